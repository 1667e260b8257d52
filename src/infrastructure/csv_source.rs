//! CSV loading and cleaning for the unemployment data file.
//!
//! Header contract: `Region`, `Date` (DD-MM-YYYY) and
//! `Estimated Unemployment Rate (%)`. The published file pads headers and
//! fields with spaces, repeats a header name, and carries runs of empty
//! `,,,,` rows; all of that is tolerated here.

use crate::application::dataset_source::DatasetSource;
use crate::domain::error::DataLoadError;
use crate::domain::unemployment::{Dataset, UnemploymentRecord};
use async_trait::async_trait;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::PathBuf;

pub const REGION_COLUMN: &str = "Region";
pub const DATE_COLUMN: &str = "Date";
pub const RATE_COLUMN: &str = "Estimated Unemployment Rate (%)";
const RATE_COLUMN_HINT: &str = "Unemployment Rate";
const DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Clone)]
pub struct CsvDatasetSource {
    path: PathBuf,
}

impl CsvDatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for CsvDatasetSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Dataset, DataLoadError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| DataLoadError::Io {
                path: self.path.clone(),
                source,
            })?;

        parse_dataset(bytes.as_slice())
    }
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    region: usize,
    date: usize,
    rate: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, DataLoadError> {
        // First occurrence wins for repeated header names
        let mut columns: Vec<(String, usize)> = Vec::new();
        for (idx, raw) in headers.iter().enumerate() {
            let name = normalize_header(raw);
            if !columns.iter().any(|(existing, _)| *existing == name) {
                columns.push((name, idx));
            }
        }

        let position = |matches: &dyn Fn(&str) -> bool| {
            columns
                .iter()
                .find(|(name, _)| matches(name.as_str()))
                .map(|(_, idx)| *idx)
        };
        let required = |column: &str| {
            position(&|name| name == column)
                .ok_or_else(|| DataLoadError::MissingColumn(column.to_string()))
        };

        let region = required(REGION_COLUMN)?;
        let date = required(DATE_COLUMN)?;
        let rate = required(RATE_COLUMN).or_else(|err| {
            position(&|name| name.contains(RATE_COLUMN_HINT)).ok_or(err)
        })?;

        Ok(Self { region, date, rate })
    }
}

fn normalize_header(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_string()
}

enum ParsedRow {
    Record(UnemploymentRecord),
    Blank,
    MissingKey,
    MissingRate,
}

#[derive(Debug, Default)]
struct LoadStats {
    rows_read: usize,
    blank: usize,
    missing_key: usize,
    missing_rate: usize,
    out_of_range: usize,
}

/// Parse and clean a whole CSV document into a [`Dataset`].
pub fn parse_dataset<R: Read>(input: R) -> Result<Dataset, DataLoadError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| normalize_header(h).is_empty()) {
        return Err(DataLoadError::Empty);
    }
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut records = Vec::new();
    let mut stats = LoadStats::default();

    for result in reader.records() {
        let row = result?;
        stats.rows_read += 1;

        match parse_row(&row, columns)? {
            ParsedRow::Record(record) => {
                if !(0.0..=100.0).contains(&record.unemployment_rate) {
                    stats.out_of_range += 1;
                }
                records.push(record);
            }
            ParsedRow::Blank => stats.blank += 1,
            ParsedRow::MissingKey => stats.missing_key += 1,
            ParsedRow::MissingRate => stats.missing_rate += 1,
        }
    }

    if stats.missing_key > 0 || stats.missing_rate > 0 {
        tracing::warn!(
            missing_region_or_date = stats.missing_key,
            missing_rate = stats.missing_rate,
            "Dropped incomplete rows"
        );
    }
    if stats.out_of_range > 0 {
        tracing::warn!(count = stats.out_of_range, "Rates outside 0-100% kept as-is");
    }
    tracing::info!(
        rows_read = stats.rows_read,
        rows_used = records.len(),
        blank_rows = stats.blank,
        "Parsed unemployment CSV"
    );

    if records.is_empty() {
        return Err(DataLoadError::Empty);
    }

    Ok(Dataset::new(records))
}

fn parse_row(row: &StringRecord, columns: ColumnIndex) -> Result<ParsedRow, DataLoadError> {
    let field = |idx: usize| row.get(idx).map(str::trim).filter(|v| !v.is_empty());
    let line = row.position().map(|p| p.line()).unwrap_or_default();

    let (region, date) = match (field(columns.region), field(columns.date)) {
        (None, None) => return Ok(ParsedRow::Blank),
        (Some(region), Some(date)) => (region, date),
        _ => return Ok(ParsedRow::MissingKey),
    };

    let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| {
        DataLoadError::InvalidDate {
            line,
            value: date.to_string(),
        }
    })?;

    let Some(raw_rate) = field(columns.rate) else {
        return Ok(ParsedRow::MissingRate);
    };
    let rate = raw_rate
        .parse::<f64>()
        .ok()
        .filter(|r| r.is_finite())
        .ok_or_else(|| DataLoadError::InvalidRate {
            line,
            value: raw_rate.to_string(),
        })?;

    Ok(ParsedRow::Record(UnemploymentRecord::new(region, date, rate)))
}
