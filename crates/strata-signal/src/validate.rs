//! Physical range validation for raw readings.
//!
//! Out-of-range readings are reported as [`ReadingState::Invalid`] and are
//! never clamped into range. Validation does not depend on the network class.

use crate::measurement::{MeasurementKind, ReadingState};

/// Lowest RSRP a modem can report, dBm.
pub const MIN_RSRP: i32 = -140;
/// RSRP must be strictly below this, dBm.
pub const RSRP_CEILING: i32 = 0;
pub const MIN_RSRQ: i32 = -34;
pub const MAX_RSRQ: i32 = 3;
pub const MIN_RSSNR: i32 = -20;
pub const MAX_RSSNR: i32 = 30;

/// Inclusive valid range for `kind`.
pub fn valid_range(kind: MeasurementKind) -> (i32, i32) {
    match kind {
        MeasurementKind::Power => (MIN_RSRP, RSRP_CEILING - 1),
        MeasurementKind::Quality => (MIN_RSRQ, MAX_RSRQ),
        MeasurementKind::NoiseRatio => (MIN_RSSNR, MAX_RSSNR),
    }
}

/// Validate a raw reading of `kind`.
pub fn validate(kind: MeasurementKind, raw: Option<i32>) -> ReadingState {
    let Some(value) = raw else {
        return ReadingState::NotReported;
    };
    let (min, max) = valid_range(kind);
    if (min..=max).contains(&value) {
        ReadingState::Valid(value)
    } else {
        ReadingState::Invalid
    }
}
