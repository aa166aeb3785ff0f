//! Reading and writing the table as tab-separated text.
//!
//! The column names and their order are relied on by the tools
//! that read the sample file, including the odd casing of
//! visit_last_Day and ICI_lasting, so they must not change.

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use tracing::{debug, info};

use crate::drug_exposure::ExposureRow;
use crate::error::Result;

pub const COLUMNS: [&str; 21] = [
    "patient_no",
    "sub",
    "index_date",
    "follow_end",
    "index_lastdate",
    "visit_last_Day",
    "new_drug_exposure_date",
    "day",
    "day_num",
    "drug_concept_id",
    "drug_name",
    "drug_name_dose",
    "ICI_lasting",
    "sum_quantity",
    "real_sum_days_supply",
    "liver_tox",
    "non_tox",
    "daily",
    "cu_daily",
    "measurement_date",
    "grade",
];

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The row as output fields, in COLUMNS order
pub fn to_record(row: &ExposureRow) -> [String; 21] {
    [
        row.patient_no.to_string(),
        row.sub.to_string(),
        format_date(row.window.index_date),
        format_date(row.window.follow_end),
        format_date(row.window.index_lastdate),
        format_date(row.window.visit_last_day),
        format_date(row.new_drug_exposure_date),
        row.day.clone(),
        row.day_num.to_string(),
        row.drug.drug_concept_id.to_string(),
        row.drug.drug_name.to_string(),
        row.drug.drug_name_dose.to_string(),
        row.ici_lasting.to_string(),
        row.sum_quantity.to_string(),
        row.real_sum_days_supply.to_string(),
        row.liver_tox.to_string(),
        row.non_tox.to_string(),
        row.daily.clone(),
        row.cu_daily.clone(),
        format_date(row.measurement_date),
        row.grade.to_string(),
    ]
}

/// Write the header and rows to any writer. Fields are never
/// quoted; none of the generated values contain a tab or newline.
pub fn write_tsv<W>(writer: W, rows: &[ExposureRow]) -> Result<()>
where
    W: Write,
{
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    writer.write_record(COLUMNS)?;
    for row in rows {
        writer.write_record(to_record(row))?;
    }
    writer.flush()?;
    Ok(())
}

/// Save the table to a file, replacing anything already there
pub fn save_tsv<P>(path: P, rows: &[ExposureRow]) -> Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    debug!("Writing {} rows to {}", rows.len(), path.display());
    let file = fs::File::create(path)?;
    write_tsv(file, rows)?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Read a saved table back as the header and the records,
/// all fields kept as strings.
pub fn load_tsv<P>(path: P) -> Result<(Vec<String>, Vec<Vec<String>>)>
where
    P: AsRef<Path>,
{
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .from_path(path.as_ref())?;

    let header: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    let records = reader
        .records()
        .map(|record| -> Result<Vec<String>> { Ok(record?.iter().map(String::from).collect()) })
        .collect::<Result<Vec<_>>>()?;
    debug!("Read {} records from {}", records.len(), path.as_ref().display());
    Ok((header, records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drug_exposure::make_drug_exposure;
    use crate::seeded_rng::make_rng;
    use std::path::PathBuf;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn sample_rows(seed: u64, num_rows: usize) -> Vec<ExposureRow> {
        let mut rng = make_rng(seed, "drug_exposure");
        make_drug_exposure(&mut rng, num_rows, ymd(2019, 10, 1), ymd(2020, 3, 28)).unwrap()
    }

    /// A file path in the temp directory unique to this test
    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "synth_drug_exposure_{}_{name}.txt",
            std::process::id()
        ))
    }

    fn write_to_string(rows: &[ExposureRow]) -> String {
        let mut buffer = Vec::new();
        write_tsv(&mut buffer, rows).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn header_line_is_exact() {
        let text = write_to_string(&sample_rows(0, 3));
        let first = text.lines().next().unwrap();
        assert_eq!(
            first,
            "patient_no\tsub\tindex_date\tfollow_end\tindex_lastdate\tvisit_last_Day\t\
             new_drug_exposure_date\tday\tday_num\tdrug_concept_id\tdrug_name\t\
             drug_name_dose\tICI_lasting\tsum_quantity\treal_sum_days_supply\t\
             liver_tox\tnon_tox\tdaily\tcu_daily\tmeasurement_date\tgrade"
        );
    }

    #[test]
    fn every_line_has_all_columns() {
        let text = write_to_string(&sample_rows(1, 20));
        assert!(text.ends_with('\n'));
        for line in text.lines() {
            assert_eq!(line.split('\t').count(), 21, "{line:?}");
        }
    }

    #[test]
    fn fields_render_like_sample_file() {
        let rows = sample_rows(2, 40);
        for row in &rows {
            let record = to_record(row);
            assert_eq!(record[0], "1");
            assert_eq!(record[1], "1");
            assert_eq!(record[2], "2019-10-01");
            assert_eq!(record[3], "2020-03-20");
            assert_eq!(record[4], "2020-03-28");
            assert_eq!(record[5], "2020-03-31");
            assert_eq!(record[6], record[19]);
            assert_eq!(record[7], format!("D{}", record[8]));
            assert_eq!(record[17], record[18]);
            assert_eq!(record[20], " ");
            if row.drug.drug_name == "Atezolizumab" {
                assert_eq!(record[12].len(), 10);
            } else {
                assert_eq!(record[12], "0");
            }
        }
    }

    #[test]
    fn file_has_row_count_plus_one_lines() {
        let path = temp_path("line_count");
        save_tsv(&path, &sample_rows(3, 5)).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 6);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn seeded_runs_write_identical_files() {
        let first = temp_path("determinism_a");
        let second = temp_path("determinism_b");
        save_tsv(&first, &sample_rows(42, 5)).unwrap();
        save_tsv(&second, &sample_rows(42, 5)).unwrap();
        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
        fs::remove_file(&first).unwrap();
        fs::remove_file(&second).unwrap();
    }

    #[test]
    fn save_overwrites_existing_file() {
        let path = temp_path("overwrite");
        save_tsv(&path, &sample_rows(4, 30)).unwrap();
        save_tsv(&path, &sample_rows(4, 2)).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn load_reads_back_saved_table() {
        let path = temp_path("load");
        let rows = sample_rows(5, 10);
        save_tsv(&path, &rows).unwrap();
        let (header, records) = load_tsv(&path).unwrap();
        assert_eq!(header, COLUMNS);
        assert_eq!(records.len(), 10);
        for (record, row) in records.iter().zip(&rows) {
            assert_eq!(record.as_slice(), to_record(row).as_slice());
        }
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn save_to_missing_directory_fails() {
        let path = temp_path("no_such_dir").join("out.txt");
        assert!(save_tsv(&path, &sample_rows(6, 1)).is_err());
    }
}
