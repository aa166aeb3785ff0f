//! Synthetic drug exposure data
//!
//! Generates a fictional drug_exposure table (one patient, a run
//! of drug administrations through a study window, with toxicity
//! flags and supply columns) and saves it as tab-separated text,
//! for use as sample input to the downstream analysis tools.
//!

use tracing::debug;

pub use config::{ConfigOverrides, GeneratorConfig};
pub use drug_exposure::{make_drug_exposure, ExposureRow, IciLasting, StudyWindow};
pub use error::{Error, Result};
pub use seeded_rng::make_rng;
pub use tsv::{load_tsv, save_tsv, write_tsv, COLUMNS};

pub mod config;
pub mod drug_exposure;
pub mod drugs;
pub mod error;
pub mod seeded_rng;
pub mod tsv;

/// Id used to derive the drug_exposure generator from the global seed
pub const DRUG_EXPOSURE_ID: &str = "drug_exposure";

/// Generate the table described by config from the given global
/// seed and save it to config.output. Returns the rows written.
pub fn write_sample_file(config: &GeneratorConfig, global_seed: u64) -> Result<Vec<ExposureRow>> {
    config.validate()?;
    debug!(
        "Generating {} rows from {} to {} with seed {global_seed}",
        config.row_count, config.window_start, config.window_end
    );
    let mut rng = make_rng(global_seed, DRUG_EXPOSURE_ID);
    let rows = make_drug_exposure(
        &mut rng,
        config.row_count,
        config.window_start,
        config.window_end,
    )?;
    save_tsv(&config.output, &rows)?;
    Ok(rows)
}
