//! # Level Classifier
//!
//! Maps one [`LteMeasurement`] plus the serving cell's network class to a
//! signal-bar level:
//!
//! 1. each reading is range-checked ([`crate::validate`]),
//! 2. the table for `(kind, class)` is selected from the configuration,
//! 3. each kind gets its own level,
//! 4. the enabled kinds are combined with [`crate::composition::resolve`].
//!
//! The classifier holds nothing but an `Arc` to an immutable configuration,
//! so it is cheap to clone and safe to share between threads.

use std::sync::Arc;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::composition::{resolve, KindLevels, KindMask};
use crate::config::ClassifierConfig;
use crate::level::SignalLevel;
use crate::measurement::{LteMeasurement, MeasurementKind, ReadingState};
use crate::thresholds::NetworkClass;
use crate::validate::validate;

/// Outcome for a single measurement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KindReport {
    pub kind: MeasurementKind,
    pub reading: ReadingState,
    pub level: SignalLevel,
    /// Whether this kind fed the resolved level.
    pub enabled: bool,
}

/// Full classification result for one measurement update.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalReport {
    pub class: NetworkClass,
    pub mask: KindMask,
    /// One entry per kind, in [`MeasurementKind::ALL`] order.
    #[serde(deserialize_with = "kinds_in_order")]
    pub kinds: [KindReport; 3],
    pub level: SignalLevel,
}

/// Accepts the entries in any order, but exactly one per kind.
fn kinds_in_order<'de, D>(deserializer: D) -> Result<[KindReport; 3], D::Error>
where
    D: Deserializer<'de>,
{
    let mut kinds = <[KindReport; 3]>::deserialize(deserializer)?;
    kinds.sort_by_key(|k| k.kind);
    if kinds.iter().map(|k| k.kind).ne(MeasurementKind::ALL) {
        return Err(de::Error::custom(
            "expected exactly one report per measurement kind",
        ));
    }
    Ok(kinds)
}

impl SignalReport {
    pub fn kind(&self, kind: MeasurementKind) -> &KindReport {
        &self.kinds[kind as usize]
    }

    /// Validated reading for `kind`.
    pub fn reading(&self, kind: MeasurementKind) -> ReadingState {
        self.kind(kind).reading
    }

    pub fn kind_level(&self, kind: MeasurementKind) -> SignalLevel {
        self.kind(kind).level
    }

    pub fn rsrp(&self) -> ReadingState {
        self.reading(MeasurementKind::Power)
    }

    pub fn rsrq(&self) -> ReadingState {
        self.reading(MeasurementKind::Quality)
    }

    pub fn rssnr(&self) -> ReadingState {
        self.reading(MeasurementKind::NoiseRatio)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LevelClassifier {
    config: Arc<ClassifierConfig>,
}

impl LevelClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self::from_snapshot(Arc::new(config))
    }

    pub fn from_snapshot(config: Arc<ClassifierConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a measurement update.
    pub fn classify(&self, measurement: &LteMeasurement, class: NetworkClass) -> SignalReport {
        let profile = self.config.profile(class);
        let mask = profile.mask.or_power();

        let kinds = MeasurementKind::ALL.map(|kind| {
            let reading = validate(kind, measurement.raw(kind));
            KindReport {
                kind,
                reading,
                level: profile.table(kind).level_for(reading),
                enabled: mask.contains(kind),
            }
        });

        let levels: KindLevels = kinds.iter().map(|r| (r.kind, r.level)).collect();
        let level = resolve(&levels, mask, class);

        tracing::trace!(
            %class,
            rsrp = %kinds[0].reading,
            rsrq = %kinds[1].reading,
            rssnr = %kinds[2].reading,
            %level,
            "classified measurement"
        );

        SignalReport {
            class,
            mask,
            kinds,
            level,
        }
    }

    /// Resolved level only.
    pub fn level(&self, measurement: &LteMeasurement, class: NetworkClass) -> SignalLevel {
        self.classify(measurement, class).level
    }
}
