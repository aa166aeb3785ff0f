//! Settings for a generator run.
//!
//! Settings are layered: defaults, then a YAML file, then
//! ConfigOverrides (the command line flags). They are only
//! validated once all layers are applied.
//!
//! The defaults reproduce the sample file handed to downstream
//! users: 200 rows over the 2019-10-01 to 2020-03-28 window,
//! written to sample_drug_data.txt. Any field can be set from
//! a YAML file, e.g.
//!
//! ```yaml
//! row_count: 50
//! window_start: 2019-11-01
//! seed: 7
//! ```

use std::io::Read;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::drug_exposure::{days_after, StudyWindow, ICI_LASTING_DAYS, MAX_EXPOSURE_STEP};
use crate::error::{Error, Result};

pub const DEFAULT_ROW_COUNT: usize = 200;
pub const DEFAULT_OUTPUT: &str = "sample_drug_data.txt";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Number of data rows to write (not counting the header)
    pub row_count: usize,
    /// First day of the study window; exposure dates start here
    pub window_start: NaiveDate,
    /// Last day of the study window
    pub window_end: NaiveDate,
    /// Global seed. When absent one is drawn at startup and logged.
    pub seed: Option<u64>,
    /// Where to write the table
    pub output: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            row_count: DEFAULT_ROW_COUNT,
            window_start: ymd(2019, 10, 1),
            window_end: ymd(2020, 3, 28),
            seed: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("Default window dates should be valid")
}

impl GeneratorConfig {
    /// Read settings from a YAML byte source. Missing fields
    /// take their default value. The result is not validated,
    /// since later overrides may still change the window.
    ///
    /// You can pass the result of std::fs::File::open() on
    /// a yaml file to this function.
    pub fn from_reader<R>(reader: R) -> Result<Self>
    where
        R: Read,
    {
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Replace every field that is set in overrides, then
    /// validate the combined settings.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(row_count) = overrides.row_count {
            self.row_count = row_count;
        }
        if let Some(window_start) = overrides.window_start {
            self.window_start = window_start;
        }
        if let Some(window_end) = overrides.window_end {
            self.window_end = window_end;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check the window is not inverted, and that every date the
    /// generator can produce (window constants, the furthest
    /// exposure date and its ICI lasting date) is representable.
    pub fn validate(&self) -> Result<()> {
        if self.window_end < self.window_start {
            return Err(Error::Config(format!(
                "window_end {} is before window_start {}",
                self.window_end, self.window_start
            )));
        }
        StudyWindow::new(self.window_start, self.window_end)?;
        let furthest = (self.row_count as u64)
            .saturating_mul(MAX_EXPOSURE_STEP)
            .saturating_add(ICI_LASTING_DAYS);
        days_after(self.window_start, furthest)?;
        Ok(())
    }
}

/// Values set on the command line. None leaves the file or
/// default value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub row_count: Option<usize>,
    pub window_start: Option<NaiveDate>,
    pub window_end: Option<NaiveDate>,
    pub seed: Option<u64>,
    pub output: Option<PathBuf>,
}
