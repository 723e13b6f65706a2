//! Carrier configuration for signal-bar classification.
//!
//! Carrier documents are parsed into loosely typed `*Input` structs and then
//! resolved into an immutable [`ClassifierConfig`]. Every key is optional;
//! anything missing or malformed falls back to the built-in value for that
//! key alone and is reported as a [`ConfigIssue`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::composition::KindMask;
use crate::measurement::MeasurementKind;
use crate::thresholds::{NetworkClass, ThresholdError, ThresholdTable};

pub const CONFIG_VERSION: u32 = 1;

// ── Errors ──────────────────────────────────────────────────────────

/// The configuration document could not be used at all.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("unsupported config version {0}")]
    UnsupportedVersion(u32),
}

/// A key that was ignored in favour of its built-in value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    #[error("{class} {kind} thresholds rejected, using defaults: {source}")]
    MalformedThresholds {
        class: NetworkClass,
        kind: MeasurementKind,
        source: ThresholdError,
    },
    #[error("{class} `{key}` ignored, expected {expected}")]
    WrongType {
        class: NetworkClass,
        key: &'static str,
        expected: &'static str,
    },
    #[error("{class} signal bar enables no measurement kinds, using rsrp only")]
    EmptyComposition { class: NetworkClass },
}

// ── Input layer ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassifierConfigInput {
    pub version: u32,
    pub terrestrial: ClassProfileInput,
    pub non_terrestrial: ClassProfileInput,
}

/// Per-class keys. Values stay untyped until [`ClassProfileInput::resolve`]
/// so a badly typed key only loses itself.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassProfileInput {
    /// Enabled kinds by name. Takes precedence over `mask`.
    pub kinds: Option<toml::Value>,
    /// Enabled kinds as a raw bitmask.
    pub mask: Option<toml::Value>,
    pub power: Option<toml::Value>,
    pub quality: Option<toml::Value>,
    pub noise_ratio: Option<toml::Value>,
}

fn int_list(value: &toml::Value) -> Option<Vec<i32>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_integer().and_then(|i| i32::try_from(i).ok()))
        .collect()
}

fn kind_list(value: &toml::Value) -> Option<Vec<MeasurementKind>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().and_then(MeasurementKind::from_name))
        .collect()
}

impl ClassProfileInput {
    fn thresholds(&self, kind: MeasurementKind) -> Option<&toml::Value> {
        match kind {
            MeasurementKind::Power => self.power.as_ref(),
            MeasurementKind::Quality => self.quality.as_ref(),
            MeasurementKind::NoiseRatio => self.noise_ratio.as_ref(),
        }
    }

    fn composition(
        &self,
        class: NetworkClass,
        issues: &mut Vec<ConfigIssue>,
    ) -> Option<KindMask> {
        if let Some(value) = &self.kinds {
            match kind_list(value) {
                Some(kinds) => return Some(kinds.into_iter().collect()),
                None => issues.push(ConfigIssue::WrongType {
                    class,
                    key: "kinds",
                    expected: "a list of kind names",
                }),
            }
        }
        let value = self.mask.as_ref()?;
        match value.as_integer().and_then(|i| u8::try_from(i).ok()) {
            Some(bits) => Some(KindMask::from_bits_truncate(bits)),
            None => {
                issues.push(ConfigIssue::WrongType {
                    class,
                    key: "mask",
                    expected: "an integer in 0..=255",
                });
                None
            }
        }
    }

    fn resolve(&self, class: NetworkClass, issues: &mut Vec<ConfigIssue>) -> ClassProfile {
        let mut profile = ClassProfile::builtin(class);

        for kind in MeasurementKind::ALL {
            let Some(value) = self.thresholds(kind) else {
                continue;
            };
            let Some(values) = int_list(value) else {
                issues.push(ConfigIssue::WrongType {
                    class,
                    key: kind.config_key(),
                    expected: "a list of 32-bit integers",
                });
                continue;
            };
            match ThresholdTable::try_from_slice(&values) {
                Ok(table) => profile.set_table(kind, table),
                Err(source) => issues.push(ConfigIssue::MalformedThresholds {
                    class,
                    kind,
                    source,
                }),
            }
        }

        if let Some(mask) = self.composition(class, issues) {
            if mask.is_empty() {
                issues.push(ConfigIssue::EmptyComposition { class });
            } else {
                profile.mask = mask;
            }
        }

        profile
    }
}

impl ClassifierConfigInput {
    /// Resolve into a snapshot, returning every fallback that was applied.
    pub fn resolve_with_issues(self) -> Result<(ClassifierConfig, Vec<ConfigIssue>), ConfigError> {
        let version = if self.version == 0 {
            CONFIG_VERSION
        } else {
            self.version
        };
        if version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion(version));
        }

        let mut issues = Vec::new();
        let terrestrial = self
            .terrestrial
            .resolve(NetworkClass::Terrestrial, &mut issues);
        let non_terrestrial = self
            .non_terrestrial
            .resolve(NetworkClass::NonTerrestrial, &mut issues);

        Ok((
            ClassifierConfig {
                version,
                terrestrial,
                non_terrestrial,
            },
            issues,
        ))
    }

    /// Resolve into a snapshot, logging each fallback.
    pub fn resolve(self) -> Result<ClassifierConfig, ConfigError> {
        let (config, issues) = self.resolve_with_issues()?;
        for issue in &issues {
            tracing::warn!(%issue, "carrier config fallback");
        }
        Ok(config)
    }
}

// ── Snapshot ────────────────────────────────────────────────────────

/// Tables and composition for one network class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ClassProfile {
    /// Kinds that feed the bar. Never empty.
    pub mask: KindMask,
    pub power: ThresholdTable,
    pub quality: ThresholdTable,
    pub noise_ratio: ThresholdTable,
}

impl ClassProfile {
    /// Built-in tables with an RSRP-only bar.
    pub fn builtin(class: NetworkClass) -> Self {
        Self {
            mask: KindMask::POWER,
            power: ThresholdTable::builtin(MeasurementKind::Power, class),
            quality: ThresholdTable::builtin(MeasurementKind::Quality, class),
            noise_ratio: ThresholdTable::builtin(MeasurementKind::NoiseRatio, class),
        }
    }

    pub fn table(&self, kind: MeasurementKind) -> ThresholdTable {
        match kind {
            MeasurementKind::Power => self.power,
            MeasurementKind::Quality => self.quality,
            MeasurementKind::NoiseRatio => self.noise_ratio,
        }
    }

    fn set_table(&mut self, kind: MeasurementKind, table: ThresholdTable) {
        match kind {
            MeasurementKind::Power => self.power = table,
            MeasurementKind::Quality => self.quality = table,
            MeasurementKind::NoiseRatio => self.noise_ratio = table,
        }
    }
}

/// Immutable classification configuration.
///
/// Shared behind an `Arc` and replaced wholesale on reconfiguration; see
/// [`crate::store::ConfigStore`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ClassifierConfig {
    pub version: u32,
    pub terrestrial: ClassProfile,
    pub non_terrestrial: ClassProfile,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            terrestrial: ClassProfile::builtin(NetworkClass::Terrestrial),
            non_terrestrial: ClassProfile::builtin(NetworkClass::NonTerrestrial),
        }
    }
}

impl ClassifierConfig {
    pub fn profile(&self, class: NetworkClass) -> &ClassProfile {
        match class {
            NetworkClass::Terrestrial => &self.terrestrial,
            NetworkClass::NonTerrestrial => &self.non_terrestrial,
        }
    }

    fn profile_mut(&mut self, class: NetworkClass) -> &mut ClassProfile {
        match class {
            NetworkClass::Terrestrial => &mut self.terrestrial,
            NetworkClass::NonTerrestrial => &mut self.non_terrestrial,
        }
    }

    /// Threshold table in effect for `(kind, class)`.
    pub fn select_table(&self, kind: MeasurementKind, class: NetworkClass) -> ThresholdTable {
        self.profile(class).table(kind)
    }

    /// Enabled kinds for `class`.
    pub fn mask(&self, class: NetworkClass) -> KindMask {
        self.profile(class).mask
    }

    pub fn with_table(
        mut self,
        kind: MeasurementKind,
        class: NetworkClass,
        table: ThresholdTable,
    ) -> Self {
        self.profile_mut(class).set_table(kind, table);
        self
    }

    /// Replace the composition for `class`. An empty mask is stored as
    /// RSRP-only.
    pub fn with_mask(mut self, class: NetworkClass, mask: KindMask) -> Self {
        if mask.is_empty() {
            let issue = ConfigIssue::EmptyComposition { class };
            tracing::warn!(%issue, "carrier config fallback");
        }
        self.profile_mut(class).mask = mask.or_power();
        self
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        if input.trim().is_empty() {
            return Ok(ClassifierConfig::default());
        }
        let parsed: ClassifierConfigInput = toml::from_str(input)?;
        parsed.resolve()
    }

    /// Render as a carrier document that [`ClassifierConfig::from_toml_str`]
    /// reads back unchanged.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&input)
    }
}
