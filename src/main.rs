//! Write the synthetic drug exposure sample file.
//!
//! Usage:
//!   synth_drug_exposure
//!   synth_drug_exposure --rows 5 --seed 3 --output small.txt
//!   synth_drug_exposure --config settings.yaml --check

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use synth_drug_exposure::{load_tsv, write_sample_file, ConfigOverrides, GeneratorConfig};

/// Generate a fictional drug_exposure table as tab-separated text.
///
/// Settings come from the defaults, then the config file, then
/// these flags.
#[derive(Parser)]
#[command(name = "synth_drug_exposure", version)]
struct Cli {
    /// YAML file with generator settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of rows to write
    #[arg(long)]
    rows: Option<usize>,
    /// First day of the study window (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Last day of the study window (YYYY-MM-DD)
    #[arg(long)]
    end: Option<NaiveDate>,
    /// Global seed, for a reproducible file
    #[arg(long)]
    seed: Option<u64>,
    /// Output file
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Read the file back after writing and log what was found
    #[arg(long)]
    check: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<(GeneratorConfig, bool)> {
        let config = match &self.config {
            Some(path) => {
                let file = fs::File::open(path)
                    .with_context(|| format!("Opening config file {}", path.display()))?;
                GeneratorConfig::from_reader(file)
                    .with_context(|| format!("Reading config file {}", path.display()))?
            }
            None => GeneratorConfig::default(),
        };
        let overrides = ConfigOverrides {
            row_count: self.rows,
            window_start: self.start,
            window_end: self.end,
            seed: self.seed,
            output: self.output,
        };
        let config = config
            .with_overrides(overrides)
            .context("Checking generator settings")?;
        Ok((config, self.check))
    }
}

fn main() -> Result<(), anyhow::Error> {
    // Set RUST_LOG=debug for more detail
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let (config, check) = Cli::parse().into_config()?;

    let global_seed = match config.seed {
        Some(seed) => seed,
        None => {
            let seed = rand::thread_rng().gen();
            info!("No seed given, using {seed}");
            seed
        }
    };

    write_sample_file(&config, global_seed)
        .with_context(|| format!("Writing {}", config.output.display()))?;

    if check {
        let (header, records) = load_tsv(&config.output)
            .with_context(|| format!("Reading back {}", config.output.display()))?;
        info!(
            "{} has {} columns and {} rows",
            config.output.display(),
            header.len(),
            records.len()
        );
    }

    Ok(())
}
