//! Stopword sets for lyrics analysis.

use std::collections::HashSet;

/// Common English words plus the contractions and filler syllables that
/// dominate song lyrics.
const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
    "will", "just", "don", "should", "now", "dont", "shouldnt", "d", "ll", "m", "o", "re",
    "ve", "y", "ain", "aren", "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma",
    "mightn", "mustn", "cant", "couldnt", "didnt", "doesnt", "hadnt", "hasnt", "havent",
    "isnt", "mightnt", "mustnt", "neednt", "shant", "wasnt", "werent", "wont", "wouldnt",
    "im", "youre", "hes", "shes", "theyre", "ive", "youve", "weve", "yas", "yall", "youd",
    "hed", "shed", "theyd", "theyve", "oh", "ah", "eh", "uh", "um", "hmm", "huh", "ha", "heh",
    "haha", "hahaha", "hahahaha", "ya", "yo", "yolo",
];

/// A set of words excluded from frequency analysis.
///
/// Membership is case-insensitive: words are stored and looked up in
/// lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// An empty set; nothing is filtered.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in English lyrics list.
    pub fn english() -> Self {
        Self::from_words(ENGLISH.iter().copied())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        set.extend(words);
        set
    }

    /// Add more words, e.g. from configuration.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
    }

    #[must_use]
    pub fn with_extra<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extend(words);
        self
    }

    /// Membership test for an already-lowercased token.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_list_has_no_duplicates() {
        let english = Stopwords::english();
        assert_eq!(english.len(), ENGLISH.len());
        assert!(english.contains("the"));
        assert!(english.contains("dont"));
        assert!(!english.contains("love"));
    }

    #[test]
    fn test_entries_are_normalized() {
        let words = Stopwords::from_words(["The", " ON "]);
        assert!(words.contains("the"));
        assert!(words.contains("on"));
        assert!(!words.contains("The"));
    }

    #[test]
    fn test_with_extra() {
        let words = Stopwords::english().with_extra(["baby", ""]);
        assert!(words.contains("baby"));
        assert!(!words.contains(""));
    }
}
