//! Word cloud sizing.
//!
//! Term counts in lyrics are heavily skewed, so font sizes follow the
//! logarithm of the count: the rarest term in the table gets the smallest
//! size and the most frequent one the largest.

use serde::Serialize;

use verselink_core::WordFrequencyTable;

/// Default font size range, in points.
pub const FONT_RANGE: (f64, f64) = (10.0, 100.0);

/// Logarithmic mapping from a positive domain onto an output range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LogScale {
    /// Build a scale over `domain`; values outside it are clamped.
    ///
    /// Non-positive domain bounds are raised to 1, the smallest possible
    /// word count.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let lo = domain.0.max(1.0);
        let hi = domain.1.max(lo);
        Self {
            domain: (lo, hi),
            range,
        }
    }

    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1.ln() - d0.ln();
        if span <= f64::EPSILON {
            // A degenerate domain maps everything to the middle of the range.
            return (r0 + r1) / 2.0;
        }
        let t = ((value.clamp(d0, d1)).ln() - d0.ln()) / span;
        r0 + t * (r1 - r0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCloudEntry {
    pub term: String,
    pub count: usize,
    pub font_size: f64,
}

/// A word-frequency table with a font size per term.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WordCloud {
    entries: Vec<WordCloudEntry>,
}

impl WordCloud {
    pub fn from_table(table: &WordFrequencyTable) -> Self {
        Self::with_range(table, FONT_RANGE)
    }

    pub fn with_range(table: &WordFrequencyTable, range: (f64, f64)) -> Self {
        let (Some(min), Some(max)) = (table.min_count(), table.max_count()) else {
            return Self::default();
        };
        let scale = LogScale::new((min as f64, max as f64), range);
        let entries = table
            .iter()
            .map(|e| WordCloudEntry {
                term: e.term.clone(),
                count: e.count,
                font_size: scale.scale(e.count as f64),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[WordCloudEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
