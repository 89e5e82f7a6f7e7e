use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the column appended by the dataset normalizer.
pub const NORMALIZED_PHONE_COLUMN: &str = "NormalizedPhone";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Text form fed to the phone normalizer.
    pub fn as_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(value) => write!(f, "{value}"),
            CellValue::Int(value) => write!(f, "{value}"),
            // Spreadsheets store phone columns as floats; 9876543210.0 must read as 9876543210.
            CellValue::Float(value)
                if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 =>
            {
                write!(f, "{}", *value as i64)
            }
            CellValue::Float(value) => write!(f, "{value}"),
            CellValue::Text(value) => f.write_str(value),
        }
    }
}

/// Rows are aligned to `headers`; readers pad short rows with `Empty`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { headers, rows }
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub cells: Vec<CellValue>,
    pub normalized_phone: String,
}

/// Filtered, deduplicated table plus a summary of what was dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTable {
    pub headers: Vec<String>,
    pub phone_column: String,
    pub rows: Vec<NormalizedRow>,
    pub dropped_blank: usize,
    pub dropped_duplicate: usize,
}

impl NormalizedTable {
    /// Headers with the derived phone column appended.
    pub fn output_headers(&self) -> Vec<String> {
        let mut headers = self.headers.clone();
        headers.push(NORMALIZED_PHONE_COLUMN.to_string());
        headers
    }

    pub fn phones(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.normalized_phone.as_str())
    }
}
