//! CSV loader for batches of ISO exercise scenarios.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Header
//! names are case-sensitive.
//!
//! | Column          | Required | Notes                                            |
//! |-----------------|----------|--------------------------------------------------|
//! | `tax_year`      | yes      | `2024` or `2025`                                 |
//! | `filing_status` | yes      | Label (`Head of Household`) or code (`HOH`)      |
//! | `annual_income` | no       | Free text, coerced leniently; empty means 0      |
//! | `num_isos`      | no       | Free text, coerced leniently; empty means 0      |
//! | `strike_price`  | no       | Free text, coerced leniently; empty means 0      |
//! | `share_value`   | no       | Free text, coerced leniently; empty means 0      |
//!
//! ### Example
//!
//! ```csv
//! tax_year,filing_status,annual_income,num_isos,strike_price,share_value
//! 2024,Single,150000,1000,5.00,25.00
//! 2025,MFJ,"240,000",12000,1.25,40
//! ```
use std::io::Read;
use std::path::{Path, PathBuf};

use iso_amt_core::{CalculationInput, CalculationRequest, CalculationRequestError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CsvRow {
    tax_year: String,
    filing_status: String,
    #[serde(default)]
    annual_income: String,
    #[serde(default)]
    num_isos: String,
    #[serde(default)]
    strike_price: String,
    #[serde(default)]
    share_value: String,
}

/// Errors that can occur while loading scenario rows.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Structurally invalid CSV or a missing required column.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based, not counting the header.
    #[error("unsupported tax year '{value}' on row {row}")]
    InvalidTaxYear { value: String, row: usize },

    #[error("unrecognised filing status '{status}' on row {row}")]
    InvalidFilingStatus { status: String, row: usize },
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<CalculationInput, CsvLoadError> {
    let request = CalculationRequest {
        tax_year: row.tax_year,
        filing_status: row.filing_status,
        annual_income: row.annual_income,
        num_isos: row.num_isos,
        strike_price: row.strike_price,
        share_value: row.share_value,
    };

    request.to_input().map_err(|e| match e {
        CalculationRequestError::TaxYear(_) => CsvLoadError::InvalidTaxYear {
            value: request.tax_year.clone(),
            row: row_number,
        },
        CalculationRequestError::FilingStatus(_) => CsvLoadError::InvalidFilingStatus {
            status: request.filing_status.clone(),
            row: row_number,
        },
    })
}

/// Parses scenarios from any reader, in file order.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] if the CSV is malformed or lacks `tax_year` /
///   `filing_status` columns.
/// * [`CsvLoadError::InvalidTaxYear`] / [`CsvLoadError::InvalidFilingStatus`]
///   for the first row naming an unsupported selection.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<CalculationInput>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

pub fn load_from_str(input: &str) -> Result<Vec<CalculationInput>, CsvLoadError> {
    load_from_reader(input.as_bytes())
}

pub fn load_from_file(path: &Path) -> Result<Vec<CalculationInput>, CsvLoadError> {
    let file = std::fs::File::open(path).map_err(|source| CsvLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_reader(file)
}
