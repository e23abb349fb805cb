use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::encoding::CategoricalColumn;
use crate::features::car_age;
use crate::prelude::*;

pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Year",
    "Present_Price",
    "Kms_Driven",
    "Fuel_Type",
    "Seller_Type",
    "Transmission",
    "Selling_Price",
];

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("column `{0}` is missing")]
    MissingColumn(&'static str),

    #[error("line {line}: `{column}` is empty, {n_empty_cells} empty cell(s) in total")]
    MissingValue {
        line: u64,
        column: &'static str,
        n_empty_cells: usize,
    },

    #[error("line {line}: `{column}` is out of range: {value}")]
    OutOfRange {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("line {line}: {source}")]
    MalformedRow { line: u64, source: csv::Error },

    #[error("the dataset has no rows")]
    Empty,
}

/// Single dataset row.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub year: i32,
    pub present_price: f64,
    pub kms_driven: u32,
    pub fuel_type: String,
    pub seller_type: String,
    pub transmission: String,
    pub selling_price: f64,
}

impl Record {
    #[must_use]
    pub fn label(&self, column: CategoricalColumn) -> &str {
        match column {
            CategoricalColumn::Fuel => &self.fuel_type,
            CategoricalColumn::Seller => &self.seller_type,
            CategoricalColumn::Transmission => &self.transmission,
        }
    }
}

/// Row as read from the CSV, empty cells are kept as `None` to be counted.
#[derive(Deserialize)]
struct RawRecord {
    #[serde(rename = "Year")]
    year: Option<i32>,

    #[serde(rename = "Present_Price")]
    present_price: Option<f64>,

    #[serde(rename = "Kms_Driven")]
    kms_driven: Option<u32>,

    #[serde(rename = "Fuel_Type")]
    fuel_type: Option<String>,

    #[serde(rename = "Seller_Type")]
    seller_type: Option<String>,

    #[serde(rename = "Transmission")]
    transmission: Option<String>,

    #[serde(rename = "Selling_Price")]
    selling_price: Option<f64>,
}

impl RawRecord {
    fn null_flags(&self) -> [bool; REQUIRED_COLUMNS.len()] {
        [
            self.year.is_none(),
            self.present_price.is_none(),
            self.kms_driven.is_none(),
            is_blank(&self.fuel_type),
            is_blank(&self.seller_type),
            is_blank(&self.transmission),
            self.selling_price.is_none(),
        ]
    }

    fn into_record(self, line: u64, n_empty_cells: usize) -> Result<Record, DatasetError> {
        let missing = |index: usize| DatasetError::MissingValue {
            line,
            column: REQUIRED_COLUMNS[index],
            n_empty_cells,
        };
        let year = self.year.ok_or_else(|| missing(0))?;
        if car_age(year).is_none() {
            return Err(DatasetError::OutOfRange {
                line,
                column: REQUIRED_COLUMNS[0],
                value: year.to_string(),
            });
        }
        Ok(Record {
            year,
            present_price: self.present_price.ok_or_else(|| missing(1))?,
            kms_driven: self.kms_driven.ok_or_else(|| missing(2))?,
            fuel_type: non_blank(self.fuel_type).ok_or_else(|| missing(3))?,
            seller_type: non_blank(self.seller_type).ok_or_else(|| missing(4))?,
            transmission: non_blank(self.transmission).ok_or_else(|| missing(5))?,
            selling_price: self.selling_price.ok_or_else(|| missing(6))?,
        })
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |value| value.trim().is_empty())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Fully loaded and validated dataset.
pub struct Dataset {
    pub records: Vec<Record>,

    /// Empty cell count per [`REQUIRED_COLUMNS`] entry, all zeros once loaded.
    pub null_counts: [usize; REQUIRED_COLUMNS.len()],
}

impl Dataset {
    #[instrument(skip_all, fields(path = ?path))]
    pub fn load(path: &Path) -> Result<Self> {
        let start_instant = Instant::now();
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .with_context(|| format!("failed to open `{}`", path.display()))?;
        let dataset = Self::from_reader(reader)
            .with_context(|| format!("failed to load `{}`", path.display()))?;
        info!(
            n_records = dataset.records.len(),
            elapsed = crate::logging::format_elapsed(start_instant).as_str(),
            "loaded",
        );
        Ok(dataset)
    }

    /// Reads all the rows first, so that the empty cells get counted before any row is rejected.
    pub fn from_reader<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, DatasetError> {
        let headers = reader
            .headers()
            .map_err(|source| DatasetError::MalformedRow { line: 1, source })?
            .clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|header| header == column) {
                return Err(DatasetError::MissingColumn(column));
            }
        }

        let mut raw_records = Vec::new();
        let mut null_counts = [0; REQUIRED_COLUMNS.len()];
        for row in reader.deserialize::<RawRecord>() {
            let raw_record = row.map_err(|source| DatasetError::MalformedRow {
                line: source.position().map_or(0, csv::Position::line),
                source,
            })?;
            for (count, is_null) in null_counts.iter_mut().zip(raw_record.null_flags()) {
                *count += usize::from(is_null);
            }
            raw_records.push(raw_record);
        }
        if raw_records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let n_empty_cells = null_counts.iter().sum();
        let records = raw_records
            .into_iter()
            .enumerate()
            .map(|(index, raw_record)| raw_record.into_record(index as u64 + 2, n_empty_cells))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            records,
            null_counts,
        })
    }
}
