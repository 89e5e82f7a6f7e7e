use crate::domain::{NormalizedRow, NormalizedTable, PhoneNormalizer, Table};
use crate::error::{CoreError, Result};
use std::collections::HashSet;
use tracing::debug;

/// Header keywords, most specific first.
pub const DEFAULT_PHONE_KEYWORDS: [&str; 6] =
    ["phone", "mobile", "contact", "cell", "number", "tel"];

pub fn default_phone_keywords() -> Vec<String> {
    DEFAULT_PHONE_KEYWORDS
        .iter()
        .map(|keyword| keyword.to_string())
        .collect()
}

/// Index of the phone column: keyword priority first, then column order.
///
/// Falls back to the first column when no header contains a keyword.
pub fn select_phone_column<S: AsRef<str>>(headers: &[String], keywords: &[S]) -> Result<usize> {
    if headers.is_empty() {
        return Err(CoreError::NoColumns);
    }

    let lowered: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    for keyword in keywords {
        let keyword = keyword.as_ref().to_lowercase();
        if keyword.is_empty() {
            continue;
        }
        if let Some(index) = lowered.iter().position(|header| header.contains(&keyword)) {
            return Ok(index);
        }
    }
    Ok(0)
}

/// Normalizes the phone column, drops blanks and keeps the first row per phone.
pub fn normalize_table<S: AsRef<str>>(
    table: Table,
    keywords: &[S],
    normalizer: &PhoneNormalizer,
) -> Result<NormalizedTable> {
    let column = select_phone_column(&table.headers, keywords)?;
    let phone_column = table.headers[column].clone();
    debug!(column = %phone_column, rows = table.rows.len(), "phone column selected");

    let mut dropped_blank = 0;
    let mut seen: HashSet<String> = HashSet::new();
    let mut dropped_duplicate = 0;
    let mut rows = Vec::new();

    for cells in table.rows {
        let raw = cells.get(column).map(|cell| cell.as_text()).unwrap_or_default();
        let normalized_phone = normalizer.normalize(&raw);
        if normalized_phone.is_empty() {
            dropped_blank += 1;
            continue;
        }
        if !seen.insert(normalized_phone.clone()) {
            dropped_duplicate += 1;
            continue;
        }
        rows.push(NormalizedRow {
            cells,
            normalized_phone,
        });
    }

    Ok(NormalizedTable {
        headers: table.headers,
        phone_column,
        rows,
        dropped_blank,
        dropped_duplicate,
    })
}
