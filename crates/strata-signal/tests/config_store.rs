//! Config publication under concurrent classification.
//!
//! A writer keeps swapping between two carrier configurations while reader
//! threads classify. Every reader must observe one whole configuration,
//! never a mix, and generations never go backwards.

use std::sync::atomic::{AtomicBool, Ordering};

use strata_signal::{
    ClassifierConfig, ConfigStore, LteMeasurement, MeasurementKind, NetworkClass, SignalLevel,
    ThresholdTable,
};

const PUBLISHES: u64 = 500;
const READERS: usize = 4;

fn config_a() -> ClassifierConfig {
    ClassifierConfig::default()
}

fn config_b() -> ClassifierConfig {
    let table = ThresholdTable::try_from_slice(&[-110, -100, -90, -80]).unwrap();
    ClassifierConfig::default().with_table(MeasurementKind::Power, NetworkClass::Terrestrial, table)
}

#[test]
fn readers_never_observe_a_torn_config() {
    let a = config_a();
    let b = config_b();
    let store = ConfigStore::new(a.clone());
    let done = AtomicBool::new(false);
    let m = LteMeasurement {
        rsrp: Some(-98),
        ..Default::default()
    };

    std::thread::scope(|s| {
        s.spawn(|| {
            for i in 0..PUBLISHES {
                let next = if i % 2 == 0 { b.clone() } else { a.clone() };
                store.publish(next);
            }
            done.store(true, Ordering::Release);
        });

        for _ in 0..READERS {
            s.spawn(|| {
                let mut last_gen = 0;
                loop {
                    let finished = done.load(Ordering::Acquire);

                    let generation = store.generation();
                    assert!(generation >= last_gen, "generation went backwards");
                    last_gen = generation;

                    let classifier = store.classifier();
                    let level = classifier.level(&m, NetworkClass::Terrestrial);
                    if *classifier.config() == a {
                        assert_eq!(level, SignalLevel::Great);
                    } else if *classifier.config() == b {
                        assert_eq!(level, SignalLevel::Moderate);
                    } else {
                        panic!("observed a config that was never published");
                    }

                    if finished {
                        break;
                    }
                }
            });
        }
    });

    assert_eq!(store.generation(), PUBLISHES);
    // Last publish (i = PUBLISHES - 1, odd) was config A.
    assert_eq!(*store.snapshot().config, a);
}

#[test]
fn snapshot_outlives_later_publishes() {
    let store = ConfigStore::new(config_b());
    let held = store.snapshot();
    store.publish(config_a());
    store.publish(config_a());

    assert_eq!(held.generation, 0);
    assert_eq!(*held.config, config_b());
    assert_eq!(store.generation(), 2);
}

#[test]
fn store_built_from_toml() {
    let cfg = ClassifierConfig::from_toml_str(
        r#"
version = 1

[terrestrial]
kinds = ["power", "quality"]
"#,
    )
    .unwrap();
    let store = ConfigStore::new(cfg);
    let m = LteMeasurement::new(-98, -19, 13);
    assert_eq!(
        store.classify(&m, NetworkClass::Terrestrial).level,
        SignalLevel::Poor
    );
    // NTN profile keeps the RSRP-only default.
    assert_eq!(
        store.classify(&m, NetworkClass::NonTerrestrial).level,
        SignalLevel::Good
    );
}
