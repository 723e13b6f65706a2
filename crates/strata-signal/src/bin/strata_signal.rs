//! # Strata Signal
//!
//! Classifies one LTE measurement into a signal-bar level using a carrier
//! configuration file.
//!
//! ## Usage
//!
//! ```bash
//! # Built-in tables, RSRP only
//! strata-signal --rsrp -101
//!
//! # Carrier config, satellite cell, JSON output
//! strata-signal --config carrier.toml --rsrp -95 --rsrq -13 --rssnr 6 --ntn --json
//!
//! # Show the effective config after defaults and fallbacks
//! strata-signal --config carrier.toml --print-config
//! ```

use std::path::PathBuf;

use strata_signal::{ClassifierConfig, LevelClassifier, LteMeasurement, NetworkClass};

struct Args {
    config: Option<PathBuf>,
    measurement: LteMeasurement,
    ntn: bool,
    json: bool,
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    // ── Logging ─────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    // ── Parse CLI ───────────────────────────────────────────────
    let args = parse_args()?;

    // ── Config ──────────────────────────────────────────────────
    let config = match &args.config {
        Some(path) => {
            let cfg = ClassifierConfig::load(path)?;
            tracing::info!(path = %path.display(), "loaded carrier config");
            cfg
        }
        None => ClassifierConfig::default(),
    };

    if args.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    // ── Classify ────────────────────────────────────────────────
    let classifier = LevelClassifier::new(config);
    let class = NetworkClass::from(args.ntn);
    let report = classifier.classify(&args.measurement, class);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("class: {}  mask: {}", report.class, report.mask);
    for k in &report.kinds {
        let marker = if k.enabled { "*" } else { " " };
        println!(
            "{marker} {:<6} {:>8} {}  -> {}",
            k.kind.to_string(),
            k.reading.to_string(),
            k.kind.unit(),
            k.level
        );
    }
    println!("level: {} ({} bars)", report.level, report.level.bars());
    Ok(())
}

fn parse_reading(flag: &str, val: Option<&String>) -> anyhow::Result<Option<i32>> {
    let val = val.ok_or_else(|| anyhow::anyhow!("{flag} requires a value"))?;
    let parsed = val
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid {flag} value '{val}': {e}"))?;
    Ok(Some(parsed))
}

fn parse_args() -> anyhow::Result<Args> {
    let args: Vec<String> = std::env::args().collect();
    let mut config = None;
    let mut measurement = LteMeasurement::default();
    let mut ntn = false;
    let mut json = false;
    let mut print_config = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                config = Some(PathBuf::from(
                    args.get(i)
                        .ok_or_else(|| anyhow::anyhow!("--config requires a value"))?,
                ));
            }
            "--rsrp" => {
                i += 1;
                measurement.rsrp = parse_reading("--rsrp", args.get(i))?;
            }
            "--rsrq" => {
                i += 1;
                measurement.rsrq = parse_reading("--rsrq", args.get(i))?;
            }
            "--rssnr" => {
                i += 1;
                measurement.rssnr = parse_reading("--rssnr", args.get(i))?;
            }
            "--ntn" => ntn = true,
            "--json" => json = true,
            "--print-config" => print_config = true,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                anyhow::bail!("unknown argument: {other}\nRun with --help for usage.");
            }
        }
        i += 1;
    }

    // Fallback: env var
    if config.is_none() {
        config = std::env::var_os("STRATA_SIGNAL_CONFIG").map(PathBuf::from);
    }

    Ok(Args {
        config,
        measurement,
        ntn,
        json,
        print_config,
    })
}

fn print_help() {
    println!(
        "strata-signal — classify an LTE measurement into signal bars

USAGE:
    strata-signal [OPTIONS]

OPTIONS:
    -c, --config <FILE>   Carrier config TOML [env: STRATA_SIGNAL_CONFIG]
        --rsrp <DBM>      RSRP reading
        --rsrq <DB>       RSRQ reading
        --rssnr <DB>      RSSNR reading
        --ntn             Serving cell is non-terrestrial
        --json            Print the full report as JSON
        --print-config    Print the effective config as TOML and exit
    -h, --help            Print this help"
    );
}
