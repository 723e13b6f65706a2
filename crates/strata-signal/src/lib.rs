//! Cellular signal-bar classification for the Strata platform.
//!
//! Turns raw LTE radio measurements into the 0–4 bar level shown for a
//! modem link:
//! - **Range validation** — out-of-range RSRP / RSRQ / RSSNR readings are
//!   reported as invalid, never clamped
//! - **Threshold tables** — per-carrier tables, with a separate set for
//!   non-terrestrial (satellite) cells
//! - **Composition** — carriers choose which kinds drive the bar; the weakest
//!   enabled kind wins
//! - **Configuration** — TOML carrier documents resolved into immutable
//!   snapshots, swapped atomically through [`store::ConfigStore`]
//!
//! ```
//! use strata_signal::{LevelClassifier, LteMeasurement, NetworkClass, SignalLevel};
//!
//! let classifier = LevelClassifier::default();
//! let m = LteMeasurement::new(-85, -6, -10);
//! assert_eq!(classifier.level(&m, NetworkClass::Terrestrial), SignalLevel::Great);
//! ```

pub mod classifier;
pub mod composition;
pub mod config;
pub mod level;
pub mod measurement;
pub mod store;
pub mod thresholds;
pub mod validate;

pub use classifier::{KindReport, LevelClassifier, SignalReport};
pub use composition::{resolve, KindLevels, KindMask};
pub use config::{ClassifierConfig, ConfigError, ConfigIssue};
pub use level::SignalLevel;
pub use measurement::{LteMeasurement, MeasurementKind, ReadingState};
pub use store::ConfigStore;
pub use thresholds::{NetworkClass, ThresholdError, ThresholdTable};
pub use validate::validate;
