use crate::domain::strategy::ALL_FAILED_STRATEGY;
use serde::{Deserialize, Serialize};

pub const NO_CONTACT_NAME: &str = "No contact found";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRow {
    pub filename: String,
    pub name: String,
    pub phone: String,
    pub confidence: f64,
    pub strategy: String,
}

impl ContactRow {
    /// Row emitted for an image where no strategy produced a candidate.
    pub fn placeholder(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            name: NO_CONTACT_NAME.to_string(),
            phone: String::new(),
            confidence: 0.0,
            strategy: ALL_FAILED_STRATEGY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRow {
    pub filename: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultRow {
    Contact(ContactRow),
    Error(ErrorRow),
}

impl ResultRow {
    pub fn filename(&self) -> &str {
        match self {
            ResultRow::Contact(row) => &row.filename,
            ResultRow::Error(row) => &row.filename,
        }
    }

    /// Non-empty canonical phone, if this row carries one.
    pub fn phone(&self) -> Option<&str> {
        match self {
            ResultRow::Contact(row) if !row.phone.is_empty() => Some(&row.phone),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResultRow::Error(_))
    }
}
