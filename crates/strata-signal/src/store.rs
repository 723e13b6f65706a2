//! Atomic publication of configuration snapshots.
//!
//! Readers take a cheap [`LevelClassifier`] handle (one `Arc` clone) and keep
//! classifying against that snapshot even while a new carrier configuration
//! is being published. A published snapshot is never mutated.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::classifier::{LevelClassifier, SignalReport};
use crate::config::ClassifierConfig;
use crate::measurement::LteMeasurement;
use crate::thresholds::NetworkClass;

/// A published configuration and the generation it was published as.
#[derive(Debug)]
pub struct Snapshot {
    /// Starts at 0 for the initial configuration, +1 per publish.
    pub generation: u64,
    pub config: Arc<ClassifierConfig>,
}

pub struct ConfigStore {
    current: ArcSwap<Snapshot>,
}

impl ConfigStore {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            current: ArcSwap::from_pointee(Snapshot {
                generation: 0,
                config: Arc::new(config),
            }),
        }
    }

    /// Replace the configuration. Returns the new generation.
    pub fn publish(&self, config: ClassifierConfig) -> u64 {
        let config = Arc::new(config);
        let prev = self.current.rcu(|cur| Snapshot {
            generation: cur.generation + 1,
            config: Arc::clone(&config),
        });
        let generation = prev.generation + 1;
        tracing::info!(
            generation,
            terrestrial_mask = %config.terrestrial.mask,
            ntn_mask = %config.non_terrestrial.mask,
            "published signal config"
        );
        generation
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    pub fn generation(&self) -> u64 {
        self.current.load().generation
    }

    /// Classifier bound to the current snapshot.
    pub fn classifier(&self) -> LevelClassifier {
        LevelClassifier::from_snapshot(Arc::clone(&self.current.load().config))
    }

    /// Classify against whatever snapshot is current at call time.
    pub fn classify(&self, measurement: &LteMeasurement, class: NetworkClass) -> SignalReport {
        self.classifier().classify(measurement, class)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("generation", &self.generation())
            .finish()
    }
}
