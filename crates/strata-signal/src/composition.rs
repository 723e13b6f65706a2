//! # Composite Level Resolution
//!
//! A carrier picks which measurement kinds feed the signal bar through a
//! [`KindMask`]. When several kinds are enabled the weakest one wins: strong
//! RSRP with poor RSRQ is shown as poor.
//!
//! Bit layout (matches the carrier configuration encoding):
//!
//! | Bit      | Kind   |
//! |----------|--------|
//! | `1 << 0` | RSRP   |
//! | `1 << 1` | RSRQ   |
//! | `1 << 2` | RSSNR  |

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::level::SignalLevel;
use crate::measurement::MeasurementKind;
use crate::thresholds::NetworkClass;

/// Set of measurement kinds that participate in the bar.
///
/// Serialized as its raw bits. Unknown bits are dropped on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct KindMask(u8);

impl KindMask {
    pub const EMPTY: KindMask = KindMask(0);
    pub const POWER: KindMask = KindMask(1 << 0);
    pub const QUALITY: KindMask = KindMask(1 << 1);
    pub const NOISE_RATIO: KindMask = KindMask(1 << 2);
    pub const ALL: KindMask = KindMask(0b111);

    /// Build from raw bits, dropping bits that name no known kind.
    pub fn from_bits_truncate(bits: u8) -> Self {
        KindMask(bits & Self::ALL.0)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn of(kind: MeasurementKind) -> Self {
        match kind {
            MeasurementKind::Power => Self::POWER,
            MeasurementKind::Quality => Self::QUALITY,
            MeasurementKind::NoiseRatio => Self::NOISE_RATIO,
        }
    }

    pub fn contains(self, kind: MeasurementKind) -> bool {
        self.0 & Self::of(kind).0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn with(self, kind: MeasurementKind) -> Self {
        KindMask(self.0 | Self::of(kind).0)
    }

    /// Enabled kinds in declaration order.
    pub fn kinds(self) -> impl Iterator<Item = MeasurementKind> {
        MeasurementKind::ALL
            .into_iter()
            .filter(move |k| self.contains(*k))
    }

    /// Same mask, or Power-only if empty.
    pub fn or_power(self) -> Self {
        if self.is_empty() {
            Self::POWER
        } else {
            self
        }
    }
}

impl Default for KindMask {
    fn default() -> Self {
        Self::POWER
    }
}

impl From<u8> for KindMask {
    fn from(bits: u8) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl From<KindMask> for u8 {
    fn from(mask: KindMask) -> Self {
        mask.0
    }
}

impl FromIterator<MeasurementKind> for KindMask {
    fn from_iter<I: IntoIterator<Item = MeasurementKind>>(iter: I) -> Self {
        iter.into_iter().fold(KindMask::EMPTY, KindMask::with)
    }
}

impl std::ops::BitOr for KindMask {
    type Output = KindMask;

    fn bitor(self, rhs: KindMask) -> KindMask {
        KindMask(self.0 | rhs.0)
    }
}

impl fmt::Display for KindMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let names: Vec<String> = self.kinds().map(|k| k.to_string()).collect();
        write!(f, "{}", names.join("+"))
    }
}

/// Per-kind levels for one measurement update.
pub type KindLevels = BTreeMap<MeasurementKind, SignalLevel>;

/// Combine per-kind levels into the reported level.
///
/// Only kinds in `mask` contribute and the result is their minimum. An empty
/// mask falls back to the Power level. A kind that is enabled but missing
/// from `levels` counts as [`SignalLevel::NoneOrUnknown`].
pub fn resolve(levels: &KindLevels, mask: KindMask, class: NetworkClass) -> SignalLevel {
    let mask = mask.or_power();
    let level = mask
        .kinds()
        .map(|kind| levels.get(&kind).copied().unwrap_or_default())
        .min()
        .unwrap_or_default();
    tracing::trace!(%class, %mask, %level, "resolved composite level");
    level
}
