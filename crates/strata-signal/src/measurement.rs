//! Raw radio measurements as reported by the modem.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Measurement quantity that can drive the signal bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementKind {
    /// Reference Signal Received Power (RSRP), dBm.
    Power,
    /// Reference Signal Received Quality (RSRQ), dB.
    Quality,
    /// Reference Signal Signal-to-Noise Ratio (RSSNR), dB.
    NoiseRatio,
}

impl MeasurementKind {
    pub const ALL: [MeasurementKind; 3] = [
        MeasurementKind::Power,
        MeasurementKind::Quality,
        MeasurementKind::NoiseRatio,
    ];

    /// Name used for this kind in carrier config documents.
    pub fn config_key(self) -> &'static str {
        match self {
            MeasurementKind::Power => "power",
            MeasurementKind::Quality => "quality",
            MeasurementKind::NoiseRatio => "noise_ratio",
        }
    }

    /// Inverse of [`MeasurementKind::config_key`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.config_key() == name)
    }

    /// Unit the raw reading is expressed in.
    pub fn unit(self) -> &'static str {
        match self {
            MeasurementKind::Power => "dBm",
            MeasurementKind::Quality | MeasurementKind::NoiseRatio => "dB",
        }
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementKind::Power => write!(f, "rsrp"),
            MeasurementKind::Quality => write!(f, "rsrq"),
            MeasurementKind::NoiseRatio => write!(f, "rssnr"),
        }
    }
}

/// Outcome of range validation, and what the per-kind accessors expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "value")]
pub enum ReadingState {
    /// Reported and inside the physical range for its kind.
    Valid(i32),
    /// Reported, but outside the physical range. Never clamped.
    Invalid,
    /// The modem did not report this quantity.
    NotReported,
}

impl ReadingState {
    /// The validated value, if any.
    pub fn value(self) -> Option<i32> {
        match self {
            ReadingState::Valid(v) => Some(v),
            ReadingState::Invalid | ReadingState::NotReported => None,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, ReadingState::Valid(_))
    }
}

impl fmt::Display for ReadingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadingState::Valid(v) => write!(f, "{v}"),
            ReadingState::Invalid => write!(f, "invalid"),
            ReadingState::NotReported => write!(f, "n/a"),
        }
    }
}

/// One LTE measurement update from the serving cell.
///
/// `None` means the modem did not report that quantity. Values are kept
/// exactly as reported; range checks happen at classification time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LteMeasurement {
    /// RSRP in dBm.
    pub rsrp: Option<i32>,
    /// RSRQ in dB.
    pub rsrq: Option<i32>,
    /// RSSNR in dB.
    pub rssnr: Option<i32>,
}

impl LteMeasurement {
    pub fn new(rsrp: i32, rsrq: i32, rssnr: i32) -> Self {
        Self {
            rsrp: Some(rsrp),
            rsrq: Some(rsrq),
            rssnr: Some(rssnr),
        }
    }

    /// Raw reading for `kind`.
    pub fn raw(&self, kind: MeasurementKind) -> Option<i32> {
        match kind {
            MeasurementKind::Power => self.rsrp,
            MeasurementKind::Quality => self.rsrq,
            MeasurementKind::NoiseRatio => self.rssnr,
        }
    }

    pub fn with_raw(mut self, kind: MeasurementKind, raw: Option<i32>) -> Self {
        match kind {
            MeasurementKind::Power => self.rsrp = raw,
            MeasurementKind::Quality => self.rsrq = raw,
            MeasurementKind::NoiseRatio => self.rssnr = raw,
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_measurement_reports_nothing() {
        let m = LteMeasurement::default();
        for kind in MeasurementKind::ALL {
            assert_eq!(m.raw(kind), None);
        }
    }

    #[test]
    fn with_raw_replaces_one_kind() {
        let m = LteMeasurement::new(-85, -6, -10).with_raw(MeasurementKind::Quality, None);
        assert_eq!(m.rsrp, Some(-85));
        assert_eq!(m.rsrq, None);
        assert_eq!(m.rssnr, Some(-10));
    }

    #[test]
    fn reading_state_value() {
        assert_eq!(ReadingState::Valid(-20).value(), Some(-20));
        assert_eq!(ReadingState::Invalid.value(), None);
        assert!(!ReadingState::NotReported.is_valid());
    }

    #[test]
    fn kind_display_uses_3gpp_names() {
        assert_eq!(MeasurementKind::Power.to_string(), "rsrp");
        assert_eq!(MeasurementKind::NoiseRatio.to_string(), "rssnr");
        assert_eq!(MeasurementKind::Power.unit(), "dBm");
    }

    #[test]
    fn config_names_round_trip() {
        for kind in MeasurementKind::ALL {
            assert_eq!(MeasurementKind::from_name(kind.config_key()), Some(kind));
        }
        assert_eq!(MeasurementKind::from_name("rsrp"), None);
    }
}
