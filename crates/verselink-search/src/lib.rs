//! Result ranking and lyrics analytics for verselink.
//!
//! Turns raw search hits into a [`RankedResultList`] and summarizes the
//! lyrics of a neighborhood as a stopword-filtered word-frequency table
//! with logarithmic font sizing for word clouds.
//!
//! [`RankedResultList`]: verselink_core::RankedResultList

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod cloud;
pub mod frequency;
pub mod rank;
pub mod stopwords;

pub use cloud::{LogScale, WordCloud, WordCloudEntry};
pub use frequency::{analyze, tokenize};
pub use rank::{rank, rank_response};
pub use stopwords::Stopwords;
