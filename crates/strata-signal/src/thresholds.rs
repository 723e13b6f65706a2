//! # Threshold Tables
//!
//! A threshold table is four strictly ascending boundaries. Boundary *i* is
//! the lowest reading that earns level *i + 1*; anything below boundary 0 is
//! [`SignalLevel::NoneOrUnknown`].
//!
//! | Kind  | Terrestrial              | Non-terrestrial         |
//! |-------|--------------------------|-------------------------|
//! | RSRP  | -128 / -118 / -108 / -98 | -118 / -108 / -98 / -88 |
//! | RSRQ  | -19 / -17 / -14 / -12    | -17 / -14 / -12 / -10   |
//! | RSSNR | -3 / 1 / 5 / 13          | 1 / 5 / 13 / 17         |

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::level::SignalLevel;
use crate::measurement::{MeasurementKind, ReadingState};

/// Number of boundaries in every table.
pub const THRESHOLD_COUNT: usize = 4;

// ─── Network Class ──────────────────────────────────────────────────────────

/// Whether the serving cell is terrestrial or satellite-served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkClass {
    #[default]
    Terrestrial,
    NonTerrestrial,
}

impl NetworkClass {
    pub const ALL: [NetworkClass; 2] = [NetworkClass::Terrestrial, NetworkClass::NonTerrestrial];

    /// Map the externally supplied NTN flag. A missing flag (no serving-cell
    /// state yet) is treated as terrestrial.
    pub fn from_ntn_flag(is_ntn: Option<bool>) -> Self {
        match is_ntn {
            Some(true) => NetworkClass::NonTerrestrial,
            Some(false) | None => NetworkClass::Terrestrial,
        }
    }

    pub fn is_ntn(self) -> bool {
        self == NetworkClass::NonTerrestrial
    }
}

impl From<bool> for NetworkClass {
    fn from(is_ntn: bool) -> Self {
        Self::from_ntn_flag(Some(is_ntn))
    }
}

impl fmt::Display for NetworkClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkClass::Terrestrial => write!(f, "terrestrial"),
            NetworkClass::NonTerrestrial => write!(f, "ntn"),
        }
    }
}

// ─── Errors ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThresholdError {
    #[error("expected 4 thresholds, got {len}")]
    WrongLength { len: usize },
    #[error("thresholds not strictly ascending at index {index}")]
    NotAscending { index: usize },
}

// ─── Table ──────────────────────────────────────────────────────────────────

/// Four strictly ascending level boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i32>", into = "[i32; 4]")]
pub struct ThresholdTable([i32; THRESHOLD_COUNT]);

pub const LTE_RSRP_THRESHOLDS: ThresholdTable = ThresholdTable([-128, -118, -108, -98]);
pub const LTE_RSRQ_THRESHOLDS: ThresholdTable = ThresholdTable([-19, -17, -14, -12]);
pub const LTE_RSSNR_THRESHOLDS: ThresholdTable = ThresholdTable([-3, 1, 5, 13]);

pub const NTN_LTE_RSRP_THRESHOLDS: ThresholdTable = ThresholdTable([-118, -108, -98, -88]);
pub const NTN_LTE_RSRQ_THRESHOLDS: ThresholdTable = ThresholdTable([-17, -14, -12, -10]);
pub const NTN_LTE_RSSNR_THRESHOLDS: ThresholdTable = ThresholdTable([1, 5, 13, 17]);

impl ThresholdTable {
    /// Build a table, rejecting anything that is not exactly four strictly
    /// ascending values.
    pub fn try_from_slice(values: &[i32]) -> Result<Self, ThresholdError> {
        let arr: [i32; THRESHOLD_COUNT] = values
            .try_into()
            .map_err(|_| ThresholdError::WrongLength { len: values.len() })?;
        if let Some(index) = arr.windows(2).position(|w| w[0] >= w[1]) {
            return Err(ThresholdError::NotAscending { index: index + 1 });
        }
        Ok(ThresholdTable(arr))
    }

    /// Built-in table for `(kind, class)`.
    pub fn builtin(kind: MeasurementKind, class: NetworkClass) -> Self {
        match (class, kind) {
            (NetworkClass::Terrestrial, MeasurementKind::Power) => LTE_RSRP_THRESHOLDS,
            (NetworkClass::Terrestrial, MeasurementKind::Quality) => LTE_RSRQ_THRESHOLDS,
            (NetworkClass::Terrestrial, MeasurementKind::NoiseRatio) => LTE_RSSNR_THRESHOLDS,
            (NetworkClass::NonTerrestrial, MeasurementKind::Power) => NTN_LTE_RSRP_THRESHOLDS,
            (NetworkClass::NonTerrestrial, MeasurementKind::Quality) => NTN_LTE_RSRQ_THRESHOLDS,
            (NetworkClass::NonTerrestrial, MeasurementKind::NoiseRatio) => {
                NTN_LTE_RSSNR_THRESHOLDS
            }
        }
    }

    pub fn values(&self) -> [i32; THRESHOLD_COUNT] {
        self.0
    }

    /// Boundary that introduces `level`, or `None` for
    /// [`SignalLevel::NoneOrUnknown`].
    pub fn boundary(&self, level: SignalLevel) -> Option<i32> {
        match level.bars() {
            0 => None,
            bars => self.0.get(bars as usize - 1).copied(),
        }
    }

    /// Level for an in-range value: the number of boundaries at or below it.
    pub fn level_for_value(&self, value: i32) -> SignalLevel {
        let count = self.0.iter().filter(|&&t| t <= value).count();
        SignalLevel::from_bars(count as u8)
    }

    /// Level for a validated reading. Invalid or unreported readings are
    /// always [`SignalLevel::NoneOrUnknown`].
    pub fn level_for(&self, reading: ReadingState) -> SignalLevel {
        match reading {
            ReadingState::Valid(v) => self.level_for_value(v),
            ReadingState::Invalid | ReadingState::NotReported => SignalLevel::NoneOrUnknown,
        }
    }
}

impl TryFrom<Vec<i32>> for ThresholdTable {
    type Error = ThresholdError;

    fn try_from(values: Vec<i32>) -> Result<Self, Self::Error> {
        Self::try_from_slice(&values)
    }
}

impl From<ThresholdTable> for [i32; THRESHOLD_COUNT] {
    fn from(table: ThresholdTable) -> Self {
        table.0
    }
}

impl fmt::Display for ThresholdTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "[{a}, {b}, {c}, {d}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_exactness() {
        let t = LTE_RSRP_THRESHOLDS;
        assert_eq!(t.level_for_value(-98), SignalLevel::Great);
        assert_eq!(t.level_for_value(-99), SignalLevel::Good);
        assert_eq!(t.level_for_value(-108), SignalLevel::Good);
        assert_eq!(t.level_for_value(-118), SignalLevel::Moderate);
        assert_eq!(t.level_for_value(-128), SignalLevel::Poor);
        assert_eq!(t.level_for_value(-129), SignalLevel::NoneOrUnknown);
        assert_eq!(t.level_for_value(-140), SignalLevel::NoneOrUnknown);
        assert_eq!(t.level_for_value(-44), SignalLevel::Great);
    }

    #[test]
    fn rsrq_minus_17_differs_by_class() {
        let tn = ThresholdTable::builtin(MeasurementKind::Quality, NetworkClass::Terrestrial);
        let ntn = ThresholdTable::builtin(MeasurementKind::Quality, NetworkClass::NonTerrestrial);
        assert_eq!(tn.level_for_value(-17), SignalLevel::Moderate);
        assert_eq!(ntn.level_for_value(-17), SignalLevel::Poor);
    }

    #[test]
    fn unusable_readings_skip_the_table() {
        let t = ThresholdTable::try_from_slice(&[-200, -199, -198, -197]).unwrap();
        assert_eq!(t.level_for(ReadingState::Invalid), SignalLevel::NoneOrUnknown);
        assert_eq!(t.level_for(ReadingState::NotReported), SignalLevel::NoneOrUnknown);
        assert_eq!(t.level_for(ReadingState::Valid(-100)), SignalLevel::Great);
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            ThresholdTable::try_from_slice(&[-128, -118, -108]),
            Err(ThresholdError::WrongLength { len: 3 })
        );
        assert_eq!(
            ThresholdTable::try_from_slice(&[]),
            Err(ThresholdError::WrongLength { len: 0 })
        );
        assert_eq!(
            ThresholdTable::try_from_slice(&[1, 2, 3, 4, 5]),
            Err(ThresholdError::WrongLength { len: 5 })
        );
    }

    #[test]
    fn rejects_non_ascending() {
        assert_eq!(
            ThresholdTable::try_from_slice(&[-128, -108, -118, -98]),
            Err(ThresholdError::NotAscending { index: 2 })
        );
        // Equal neighbours are not strictly ascending.
        assert_eq!(
            ThresholdTable::try_from_slice(&[1, 1, 5, 13]),
            Err(ThresholdError::NotAscending { index: 1 })
        );
    }

    #[test]
    fn boundaries_by_level() {
        let t = NTN_LTE_RSSNR_THRESHOLDS;
        assert_eq!(t.boundary(SignalLevel::NoneOrUnknown), None);
        assert_eq!(t.boundary(SignalLevel::Poor), Some(1));
        assert_eq!(t.boundary(SignalLevel::Great), Some(17));
    }

    #[test]
    fn builtin_tables_are_well_formed() {
        for class in NetworkClass::ALL {
            for kind in MeasurementKind::ALL {
                let t = ThresholdTable::builtin(kind, class);
                assert_eq!(ThresholdTable::try_from_slice(&t.values()), Ok(t));
            }
        }
    }

    #[test]
    fn serde_rejects_malformed_tables() {
        let t: ThresholdTable = serde_json::from_str("[-3, 1, 5, 13]").unwrap();
        assert_eq!(t, LTE_RSSNR_THRESHOLDS);
        assert!(serde_json::from_str::<ThresholdTable>("[13, 5, 1, -3]").is_err());
        assert_eq!(serde_json::to_string(&t).unwrap(), "[-3,1,5,13]");
    }

    #[test]
    fn ntn_flag_mapping() {
        assert_eq!(NetworkClass::from_ntn_flag(None), NetworkClass::Terrestrial);
        assert_eq!(NetworkClass::from(true), NetworkClass::NonTerrestrial);
        assert!(!NetworkClass::from(false).is_ntn());
    }
}
