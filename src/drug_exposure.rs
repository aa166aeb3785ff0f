//! Synthetic drug_exposure table
//!
//! Each row is one administration of a drug to the (single)
//! study patient. Rows walk forward through the study window:
//! every row starts from the previous row's exposure date and
//! moves on by 0-4 days. The drug is picked uniformly from the
//! reference lists, and the toxicity flags, ICI lasting date
//! and supply columns are derived from it.
//!

use std::fmt;

use chrono::{Days, NaiveDate};
use rand::Rng;

use crate::drugs::{all_drugs, is_ici_name, is_liver_tox_name, DrugRecord};
use crate::error::{Error, Result};

/// Days an ICI dose is treated as still acting after exposure
pub const ICI_LASTING_DAYS: u64 = 20;

/// Probability at or below which a non-liver-toxic row is
/// still marked non_tox = 0
pub const NON_TOX_THRESHOLD: f64 = 0.3;

/// Largest step (in days) between consecutive exposure dates
pub const MAX_EXPOSURE_STEP: u64 = 4;

fn out_of_range(date: NaiveDate, days: u64) -> Error {
    Error::Config(format!("shifting {date} by {days} days leaves the date range"))
}

/// The date `days` after `date`, or a config error past NaiveDate::MAX
pub fn days_after(date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| out_of_range(date, days))
}

fn days_before(date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_sub_days(Days::new(days))
        .ok_or_else(|| out_of_range(date, days))
}

/// The ICI_lasting column. The table stores either the date the
/// ICI effect ends, or the integer 0 for all other drugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IciLasting {
    Lasting(NaiveDate),
    NotApplicable,
}

impl fmt::Display for IciLasting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lasting(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::NotApplicable => write!(f, "0"),
        }
    }
}

/// The per-patient dates that are the same on every row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudyWindow {
    pub index_date: NaiveDate,
    pub follow_end: NaiveDate,
    pub index_lastdate: NaiveDate,
    pub visit_last_day: NaiveDate,
}

impl StudyWindow {
    /// Follow-up ends 8 days before the last index date, and the
    /// last visit is 3 days after it.
    pub fn new(window_start: NaiveDate, window_end: NaiveDate) -> Result<Self> {
        Ok(Self {
            index_date: window_start,
            follow_end: days_before(window_end, 8)?,
            index_lastdate: window_end,
            visit_last_day: days_after(window_end, 3)?,
        })
    }
}

/// One row of the drug_exposure table, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct ExposureRow {
    pub patient_no: u32,
    pub sub: u32,
    pub window: StudyWindow,
    pub new_drug_exposure_date: NaiveDate,
    /// Day label, "D" followed by day_num
    pub day: String,
    /// Days from the start of the study window
    pub day_num: i64,
    pub drug: DrugRecord,
    pub ici_lasting: IciLasting,
    pub sum_quantity: u32,
    /// Always at least sum_quantity
    pub real_sum_days_supply: u32,
    pub liver_tox: u8,
    /// Only ever 1 when liver_tox is 0
    pub non_tox: u8,
    /// "sum_quantity/real_sum_days_supply"
    pub daily: String,
    pub cu_daily: String,
    pub measurement_date: NaiveDate,
    /// Not generated; a single space in the output
    pub grade: &'static str,
}

/// Make one row whose exposure date follows on from the
/// previous exposure date (the window start for the first row).
fn make_exposure_row<R>(
    rng: &mut R,
    pool: &[DrugRecord],
    window: &StudyWindow,
    previous_exposure: NaiveDate,
) -> Result<ExposureRow>
where
    R: Rng + ?Sized,
{
    let step = rng.gen_range(0..=MAX_EXPOSURE_STEP);
    let new_drug_exposure_date = days_after(previous_exposure, step)?;
    let day_num = (new_drug_exposure_date - window.index_date).num_days();

    let drug = pool[rng.gen_range(0..pool.len())];

    let ici_lasting = if is_ici_name(drug.drug_name) {
        IciLasting::Lasting(days_after(new_drug_exposure_date, ICI_LASTING_DAYS)?)
    } else {
        IciLasting::NotApplicable
    };

    let sum_quantity = rng.gen_range(1..=30);
    let real_sum_days_supply = sum_quantity + rng.gen_range(0..=5);

    let liver_tox = u8::from(is_liver_tox_name(drug.drug_name));
    // Drawn for every row, so the stream does not depend on the drug
    let noise: f64 = rng.gen();
    let non_tox = if liver_tox == 0 && noise > NON_TOX_THRESHOLD {
        1
    } else {
        0
    };

    let daily = format!("{sum_quantity}/{real_sum_days_supply}");

    Ok(ExposureRow {
        patient_no: 1,
        sub: 1,
        window: *window,
        new_drug_exposure_date,
        day: format!("D{day_num}"),
        day_num,
        drug,
        ici_lasting,
        sum_quantity,
        real_sum_days_supply,
        liver_tox,
        non_tox,
        cu_daily: daily.clone(),
        daily,
        measurement_date: new_drug_exposure_date,
        grade: " ",
    })
}

/// Generate the drug_exposure table.
///
/// All randomness comes from rng, so passing a generator from
/// make_rng with a fixed seed gives the same rows every time.
/// The exposure date is carried from row to row, starting at
/// window_start.
///
/// Fails only if a derived date falls outside the NaiveDate range.
pub fn make_drug_exposure<R>(
    rng: &mut R,
    num_rows: usize,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Result<Vec<ExposureRow>>
where
    R: Rng + ?Sized,
{
    let pool = all_drugs();
    let window = StudyWindow::new(window_start, window_end)?;

    let (rows, _) = (0..num_rows).try_fold(
        (Vec::with_capacity(num_rows), window_start),
        |(mut rows, previous_exposure), _| -> Result<_> {
            let row = make_exposure_row(rng, &pool, &window, previous_exposure)?;
            let next_exposure = row.new_drug_exposure_date;
            rows.push(row);
            Ok((rows, next_exposure))
        },
    )?;
    Ok(rows)
}
