use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier as it appears on the wire.
///
/// The vector store behind the backend uses integer point ids, so keys
/// arrive as JSON numbers in some places and as strings in others (object
/// keys are always strings). Both normalize to the same decimal text.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireKey {
    Text(String),
    Number(serde_json::Number),
}

impl From<WireKey> for String {
    fn from(key: WireKey) -> Self {
        match key {
            WireKey::Text(text) => text,
            WireKey::Number(number) => number.to_string(),
        }
    }
}

macro_rules! define_key {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                WireKey::deserialize(deserializer).map(|key| Self(key.into()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                Self(key.to_string())
            }
        }

        impl From<String> for $name {
            fn from(key: String) -> Self {
                Self(key)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_key!(
    ResultKey,
    "Opaque identifier of a search hit, unique within one response."
);
define_key!(NodeId, "Identifier of a song node within one graph.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_key_from_string_and_number() {
        let text: NodeId = serde_json::from_str("\"42\"").unwrap();
        let number: NodeId = serde_json::from_str("42").unwrap();
        assert_eq!(text, number);
        assert_eq!(number.as_str(), "42");
    }

    #[test]
    fn test_key_serializes_as_plain_string() {
        let key = ResultKey::new("abc");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"abc\"");
    }

    #[test]
    fn test_borrow_allows_str_lookup() {
        let mut map = HashMap::new();
        map.insert(NodeId::from("n1"), 1);
        assert_eq!(map.get("n1"), Some(&1));
    }

    #[test]
    fn test_key_rejects_other_json_types() {
        assert!(serde_json::from_str::<ResultKey>("[1]").is_err());
        assert!(serde_json::from_str::<ResultKey>("null").is_err());
    }
}
