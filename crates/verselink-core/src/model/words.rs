use serde::{Deserialize, Serialize};

/// Maximum number of terms kept in a [`WordFrequencyTable`].
pub const MAX_TERMS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordFrequencyEntry {
    pub term: String,
    pub count: usize,
}

/// The most frequent terms of a text, most frequent first.
///
/// At most [`MAX_TERMS`] entries; terms are unique and counts never
/// increase along the table. Equal counts keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordFrequencyTable(Vec<WordFrequencyEntry>);

impl WordFrequencyTable {
    /// Rank `(term, count)` pairs given in first-seen order.
    ///
    /// Callers are expected to pass each term once; zero counts are dropped.
    #[must_use]
    pub fn from_counts(counts: impl IntoIterator<Item = (String, usize)>) -> Self {
        let mut entries: Vec<WordFrequencyEntry> = counts
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(term, count)| WordFrequencyEntry { term, count })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(MAX_TERMS);
        Self(entries)
    }

    pub fn entries(&self) -> &[WordFrequencyEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WordFrequencyEntry> {
        self.0.iter()
    }

    pub fn count_of(&self, term: &str) -> Option<usize> {
        self.0.iter().find(|e| e.term == term).map(|e| e.count)
    }

    pub fn max_count(&self) -> Option<usize> {
        self.0.first().map(|e| e.count)
    }

    pub fn min_count(&self) -> Option<usize> {
        self.0.last().map(|e| e.count)
    }
}

impl<'a> IntoIterator for &'a WordFrequencyTable {
    type Item = &'a WordFrequencyEntry;
    type IntoIter = std::slice::Iter<'a, WordFrequencyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
