//! Discrete signal-bar levels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Signal-bar level shown to the user.
///
/// Variants are declared in ascending order so the derived `Ord` matches the
/// numeric bar count.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SignalLevel {
    /// No signal, or nothing usable was reported.
    #[default]
    NoneOrUnknown,
    Poor,
    Moderate,
    Good,
    Great,
}

impl SignalLevel {
    /// All levels, weakest first.
    pub const ALL: [SignalLevel; 5] = [
        SignalLevel::NoneOrUnknown,
        SignalLevel::Poor,
        SignalLevel::Moderate,
        SignalLevel::Good,
        SignalLevel::Great,
    ];

    /// Number of bars (0–4).
    pub fn bars(self) -> u8 {
        self as u8
    }

    /// Level for a bar count. Counts above 4 saturate at [`SignalLevel::Great`].
    pub fn from_bars(bars: u8) -> Self {
        match bars {
            0 => SignalLevel::NoneOrUnknown,
            1 => SignalLevel::Poor,
            2 => SignalLevel::Moderate,
            3 => SignalLevel::Good,
            _ => SignalLevel::Great,
        }
    }
}

impl fmt::Display for SignalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalLevel::NoneOrUnknown => write!(f, "none"),
            SignalLevel::Poor => write!(f, "poor"),
            SignalLevel::Moderate => write!(f, "moderate"),
            SignalLevel::Good => write!(f, "good"),
            SignalLevel::Great => write!(f, "great"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_match_declaration_order() {
        for (i, level) in SignalLevel::ALL.iter().enumerate() {
            assert_eq!(level.bars() as usize, i);
            assert_eq!(SignalLevel::from_bars(i as u8), *level);
        }
    }

    #[test]
    fn ordering_is_total_and_ascending() {
        assert!(SignalLevel::NoneOrUnknown < SignalLevel::Poor);
        assert!(SignalLevel::Good < SignalLevel::Great);
        assert_eq!(
            SignalLevel::ALL.iter().copied().max(),
            Some(SignalLevel::Great)
        );
    }

    #[test]
    fn from_bars_saturates() {
        assert_eq!(SignalLevel::from_bars(9), SignalLevel::Great);
    }

    #[test]
    fn default_is_none() {
        assert_eq!(SignalLevel::default(), SignalLevel::NoneOrUnknown);
        assert_eq!(SignalLevel::default().to_string(), "none");
    }
}
