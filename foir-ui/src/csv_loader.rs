//! CSV loader for batch FOIR scenarios.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Header
//! names are case-sensitive.
//!
//! | Column | Required | Type | Notes |
//! |---------------------------|----------|---------|-----------------------------------------|
//! | `label` | no | string | Defaults to `row N` |
//! | `salary` | yes | amount | Monthly net salary, e.g. `50,000` or `₹50000` |
//! | `emis` | no | string | `;`-separated amounts, e.g. `10000;5000` |
//! | `credit_card_outstanding` | no | amount | Leave cell empty for 0 |
//!
//! Every amount is read by [`parse_amount`], so grouped digits and a
//! currency prefix are accepted the same way as at the prompt.
//!
//! ### Example
//!
//! ```csv
//! label,salary,emis,credit_card_outstanding
//! two loans,50000,10000;5000,20000
//! home loan,40000,20000,
//! ```
use foir_core::InputSnapshot;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::utils::{ParseAmountError, parse_amount};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    label: Option<String>,
    salary: String,
    emis: Option<String>,
    credit_card_outstanding: Option<String>,
}

/// One row of a batch file, ready to calculate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// 1-based data row number (header = row 0).
    pub row: usize,
    pub label: String,
    pub snapshot: InputSnapshot,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A money cell (or one entry of the `emis` cell) is not a valid amount.
    #[error("invalid {column} on row {row}: {source}")]
    InvalidAmount {
        row: usize,
        column: &'static str,
        #[source]
        source: ParseAmountError,
    },

    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Reads one money cell with the same rule as interactive input.
/// A missing or blank cell is zero.
fn parse_cell(
    cell: Option<&str>,
    column: &'static str,
    row_number: usize,
) -> Result<Decimal, CsvLoadError> {
    parse_amount(cell.unwrap_or_default()).map_err(|source| CsvLoadError::InvalidAmount {
        row: row_number,
        column,
        source,
    })
}

/// Splits an `emis` cell on `;`, skipping blank pieces.
fn parse_emis(
    cell: Option<&str>,
    row_number: usize,
) -> Result<Vec<Decimal>, CsvLoadError> {
    cell.unwrap_or_default()
        .split(';')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| parse_cell(Some(piece), "EMI", row_number))
        .collect()
}

/// Convert a single CSV row into a Scenario.
///
/// row_number is 1-based (for error messages).
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<Scenario, CsvLoadError> {
    let salary = parse_cell(Some(&row.salary), "salary", row_number)?;
    let emis = parse_emis(row.emis.as_deref(), row_number)?;
    let outstanding = parse_cell(
        row.credit_card_outstanding.as_deref(),
        "credit card outstanding",
        row_number,
    )?;
    let label = row
        .label
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| format!("row {row_number}"));

    Ok(Scenario {
        row: row_number,
        label,
        snapshot: InputSnapshot::from_amounts(salary, &emis, outstanding),
    })
}

/// Parse CSV text (the full file contents as a &str) and return the
/// scenarios in file order.
///
/// # Errors
///
/// * [CsvLoadError::Parse] – if the CSV is structurally invalid or a
///   required field cannot be deserialised.
/// * [CsvLoadError::InvalidAmount] – if a money cell holds a bad amount.
pub fn load_from_str(input: &str) -> Result<Vec<Scenario>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All) // tolerate whitespace around values
        .flexible(false) // strict column count
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            let row_number = idx + 1; // 1-based for user-facing messages
            convert_row(row, row_number)
        })
        .collect()
}

/// Convenience wrapper: read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &std::path::Path) -> Result<Vec<Scenario>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
