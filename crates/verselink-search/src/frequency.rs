//! Word-frequency analysis of lyrics text.

use std::collections::HashMap;

use verselink_core::WordFrequencyTable;

use crate::stopwords::Stopwords;

/// Word characters are Unicode-aware on purpose. An ASCII-only `\W` split
/// would cut accented words apart ("corazón" into "coraz" and "n"), which
/// inflates counts of meaningless fragments in non-English lyrics.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lowercase `text` and split it on runs of non-word characters.
///
/// A word character is any Unicode letter or digit, or `_`. Empty pieces
/// are skipped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Rank the non-stopword terms of `text` by frequency.
///
/// Terms with equal counts keep the order in which they first appear. The
/// table holds at most [`verselink_core::model::MAX_TERMS`] entries; text
/// with no surviving tokens yields an empty table.
pub fn analyze(text: &str, stopwords: &Stopwords) -> WordFrequencyTable {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for token in tokenize(text) {
        if stopwords.contains(&token) {
            continue;
        }
        match index.get(&token) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(token.clone(), counts.len());
                counts.push((token, 1));
            }
        }
    }

    log::debug!("counted {} distinct terms", counts.len());
    WordFrequencyTable::from_counts(counts)
}
