//! Human-readable training report on stdout.

use std::fmt::Write;

use itertools::Itertools;

use crate::trainer::dataset::{Dataset, Record, REQUIRED_COLUMNS};

const N_PREVIEW_ROWS: usize = 5;

const COLUMN_TYPES: [&str; REQUIRED_COLUMNS.len()] =
    ["int32", "float64", "uint32", "string", "string", "string", "float64"];

#[must_use]
pub fn format_preview(dataset: &Dataset) -> String {
    let mut buffer = REQUIRED_COLUMNS.iter().join("\t");
    for record in dataset.records.iter().take(N_PREVIEW_ROWS) {
        buffer.push('\n');
        buffer.push_str(&format_record(record));
    }
    buffer
}

fn format_record(record: &Record) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        record.year,
        record.present_price,
        record.kms_driven,
        record.fuel_type,
        record.seller_type,
        record.transmission,
        record.selling_price,
    )
}

#[must_use]
pub fn format_info(dataset: &Dataset) -> String {
    let mut buffer = format!("{} rows, {} columns", dataset.records.len(), REQUIRED_COLUMNS.len());
    for (column, type_) in REQUIRED_COLUMNS.iter().zip(COLUMN_TYPES) {
        let _ = write!(buffer, "\n{:<16}{}", column, type_);
    }
    buffer
}

#[must_use]
pub fn format_null_counts(dataset: &Dataset) -> String {
    REQUIRED_COLUMNS
        .iter()
        .zip(dataset.null_counts)
        .map(|(column, count)| format!("{:<16}{}", column, count))
        .join("\n")
}

#[must_use]
pub fn format_scores(train_score: f64, test_score: f64) -> String {
    format!("Training R² Score: {:.4}\nTesting R² Score: {:.4}", train_score, test_score)
}
