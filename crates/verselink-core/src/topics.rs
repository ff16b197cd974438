//! Topic word and probability lists.
//!
//! The backend stores `topic_words` and `topic_probs` as the printed form of
//! a Python list, e.g. `"['love', 'heart', \"don't\"]"` and `"[0.12, 0.08]"`.
//! This module reads that form with a small dedicated parser (mixed quote
//! styles and backslash escapes are handled, unlike a blind `'` to `"`
//! substitution). A real JSON array is accepted as well so the backend can
//! move to a proper serialization without breaking clients.

use serde_json::Value;

use crate::error::{Error, Result};

#[derive(Debug, PartialEq)]
enum Item {
    Quoted(String),
    Bare(String),
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            chars: raw.chars().peekable(),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn expect(&mut self, wanted: char) -> std::result::Result<(), String> {
        self.skip_whitespace();
        match self.chars.next() {
            Some(c) if c == wanted => Ok(()),
            Some(c) => Err(format!("expected '{wanted}', found '{c}'")),
            None => Err(format!("expected '{wanted}', found end of input")),
        }
    }

    fn quoted(&mut self, quote: char) -> std::result::Result<String, String> {
        let mut out = String::new();
        loop {
            match self.chars.next() {
                Some('\\') => match self.chars.next() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(c) => out.push(c),
                    None => return Err("dangling escape at end of input".to_string()),
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
                None => return Err("unterminated string".to_string()),
            }
        }
    }

    fn bare(&mut self) -> String {
        let mut out = String::new();
        while let Some(&c) = self.chars.peek() {
            if c == ',' || c == ']' || c.is_whitespace() {
                break;
            }
            out.push(c);
            self.chars.next();
        }
        out
    }

    fn item(&mut self) -> std::result::Result<Item, String> {
        self.skip_whitespace();
        match self.chars.peek().copied() {
            Some(q @ ('\'' | '"')) => {
                self.chars.next();
                self.quoted(q).map(Item::Quoted)
            }
            Some(_) => {
                let token = self.bare();
                if token.is_empty() {
                    Err("empty list element".to_string())
                } else {
                    Ok(Item::Bare(token))
                }
            }
            None => Err("unexpected end of input".to_string()),
        }
    }

    fn list(mut self) -> std::result::Result<Vec<Item>, String> {
        self.expect('[')?;
        let mut items = Vec::new();

        self.skip_whitespace();
        if self.chars.peek() == Some(&']') {
            self.chars.next();
        } else {
            loop {
                items.push(self.item()?);
                self.skip_whitespace();
                match self.chars.next() {
                    Some(',') => {
                        // Python tolerates a trailing comma.
                        self.skip_whitespace();
                        if self.chars.peek() == Some(&']') {
                            self.chars.next();
                            break;
                        }
                    }
                    Some(']') => break,
                    Some(c) => return Err(format!("expected ',' or ']', found '{c}'")),
                    None => return Err("unterminated list".to_string()),
                }
            }
        }

        self.skip_whitespace();
        match self.chars.next() {
            None => Ok(items),
            Some(c) => Err(format!("trailing character '{c}' after list")),
        }
    }
}

/// Parse a printed Python list of strings.
pub fn parse_topic_words(raw: &str) -> Result<Vec<String>> {
    Lexer::new(raw)
        .list()
        .map_err(|message| Error::parse("topic_words", message))?
        .into_iter()
        .map(|item| match item {
            Item::Quoted(word) => Ok(word),
            Item::Bare(token) => Err(Error::parse(
                "topic_words",
                format!("unquoted element {token}"),
            )),
        })
        .collect()
}

/// Parse a printed Python list of numbers.
pub fn parse_topic_probs(raw: &str) -> Result<Vec<f64>> {
    Lexer::new(raw)
        .list()
        .map_err(|message| Error::parse("topic_probs", message))?
        .into_iter()
        .map(|item| {
            let token = match item {
                Item::Bare(token) | Item::Quoted(token) => token,
            };
            token
                .parse::<f64>()
                .map_err(|e| Error::parse("topic_probs", format!("{token}: {e}")))
        })
        .collect()
}

/// Read `topic_words` from a wire value: a printed list or a JSON array.
pub fn topic_words_from_value(value: &Value) -> Result<Vec<String>> {
    match value {
        Value::String(raw) => parse_topic_words(raw),
        Value::Array(_) => serde_json::from_value(value.clone())
            .map_err(|e| Error::parse("topic_words", e.to_string())),
        other => Err(Error::parse(
            "topic_words",
            format!("expected a list, found {other}"),
        )),
    }
}

/// Read `topic_probs` from a wire value: a printed list or a JSON array.
pub fn topic_probs_from_value(value: &Value) -> Result<Vec<f64>> {
    match value {
        Value::String(raw) => parse_topic_probs(raw),
        Value::Array(_) => serde_json::from_value(value.clone())
            .map_err(|e| Error::parse("topic_probs", e.to_string())),
        other => Err(Error::parse(
            "topic_probs",
            format!("expected a list, found {other}"),
        )),
    }
}
