//! Deterministic color rules.
//!
//! Search hits are tinted on a red-to-green ramp by relevance score, and
//! graph nodes take a categorical color from a fixed 20-entry topic palette.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Number of topics produced by the upstream topic model.
pub const PALETTE_SIZE: usize = 20;

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// CSS functional notation, e.g. `rgb(228, 50, 0)`.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

const TOPIC_PALETTE: [Rgb; PALETTE_SIZE] = [
    Rgb::from_hex(0x0032_296E),
    Rgb::from_hex(0x006A_A443),
    Rgb::from_hex(0x0088_80CE),
    Rgb::from_hex(0x003B_9558),
    Rgb::from_hex(0x00B0_74C9),
    Rgb::from_hex(0x0043_9D3F),
    Rgb::from_hex(0x008D_B0D3),
    Rgb::from_hex(0x00C4_68A8),
    Rgb::from_hex(0x0034_8286),
    Rgb::from_hex(0x00E3_E7BF),
    Rgb::from_hex(0x0030_5E7E),
    Rgb::from_hex(0x00BA_854F),
    Rgb::from_hex(0x0099_D8D2),
    Rgb::from_hex(0x002C_3D76),
    Rgb::from_hex(0x00BF_5B65),
    Rgb::from_hex(0x0037_8D72),
    Rgb::from_hex(0x00EC_DCCB),
    Rgb::from_hex(0x00A6_DDB7),
    Rgb::from_hex(0x00C0_E2B2),
    Rgb::from_hex(0x0094_AB47),
];

/// Offset added to both ramp channels to brighten the result.
const BRIGHTEN: f64 = 50.0;

/// Score at which the red channel bottoms out before brightening.
const RED_CEILING: f64 = 0.7;

fn channel(value: f64) -> u8 {
    // NaN survives `clamp`, and `as u8` maps it to 0.
    (value.floor() + BRIGHTEN).clamp(0.0, 255.0) as u8
}

/// Map a relevance score onto a red (weak) to green (strong) ramp.
///
/// Every channel is clamped to `[0, 255]`, so scores outside the usual
/// `[0, 0.7]` band saturate instead of wrapping.
pub fn score_color(score: f64) -> Rgb {
    Rgb {
        r: channel(255.0 * (RED_CEILING - score)),
        g: channel(255.0 * score),
        b: 0,
    }
}

/// Look up the categorical color for a topic.
///
/// Out-of-range ids are reported as [`Error::TopicOutOfRange`] rather than
/// wrapped, since they indicate bad upstream metadata.
pub fn topic_color(topic_id: i64) -> Result<Rgb> {
    usize::try_from(topic_id)
        .ok()
        .and_then(|idx| TOPIC_PALETTE.get(idx).copied())
        .ok_or(Error::TopicOutOfRange(topic_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_color_zero() {
        assert_eq!(score_color(0.0), Rgb::new(228, 50, 0));
    }

    #[test]
    fn test_score_color_saturates_above_one() {
        let color = score_color(1.0);
        assert_eq!(color.r, 0);
        assert_eq!(color.g, 255);
        assert_eq!(color.b, 0);
    }

    #[test]
    fn test_score_color_saturates_below_zero() {
        let color = score_color(-1.0);
        assert_eq!(color.r, 255);
        assert_eq!(color.g, 0);
    }

    #[test]
    fn test_score_color_non_finite_inputs() {
        assert_eq!(score_color(f64::INFINITY), Rgb::new(0, 255, 0));
        assert_eq!(score_color(f64::NEG_INFINITY), Rgb::new(255, 0, 0));
        assert_eq!(score_color(f64::NAN), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_score_color_greener_with_higher_score() {
        let weak = score_color(0.1);
        let strong = score_color(0.5);
        assert!(strong.g > weak.g);
        assert!(strong.r < weak.r);
    }

    #[test]
    fn test_topic_color_bounds() {
        assert_eq!(topic_color(-1), Err(Error::TopicOutOfRange(-1)));
        assert_eq!(topic_color(20), Err(Error::TopicOutOfRange(20)));
        for id in 0..20 {
            assert!(topic_color(id).is_ok(), "topic {id} should have a color");
        }
    }

    #[test]
    fn test_topic_palette_is_distinct() {
        let mut seen = std::collections::HashSet::new();
        for color in TOPIC_PALETTE {
            assert!(seen.insert(color), "duplicate palette entry {color}");
        }
    }

    #[test]
    fn test_topic_color_values() {
        assert_eq!(topic_color(0).unwrap().to_string(), "#32296E");
        assert_eq!(topic_color(19).unwrap().to_string(), "#94AB47");
    }

    #[test]
    fn test_css_notation() {
        assert_eq!(Rgb::new(228, 50, 0).to_css(), "rgb(228, 50, 0)");
    }
}
