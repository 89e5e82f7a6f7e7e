use crate::source::TableSource;
use crate::{Result, SourceError};
use calamine::{open_workbook_auto, Data, Reader};
use contactsift_core::{CellValue, Table};
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Spreadsheet,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("csv") => Ok(TableFormat::Csv),
            Some("xlsx" | "xlsm" | "xls" | "ods") => Ok(TableFormat::Spreadsheet),
            _ => Err(SourceError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CsvTableSource {
    pub path: PathBuf,
}

impl TableSource for CsvTableSource {
    fn source_name(&self) -> &'static str {
        "csv"
    }

    fn fetch_table(&self) -> Result<Table> {
        let file = std::fs::File::open(&self.path)?;
        read_csv(file)
    }
}

/// First worksheet of an Excel or OpenDocument workbook.
#[derive(Debug, Clone)]
pub struct SpreadsheetTableSource {
    pub path: PathBuf,
}

impl TableSource for SpreadsheetTableSource {
    fn source_name(&self) -> &'static str {
        "spreadsheet"
    }

    fn fetch_table(&self) -> Result<Table> {
        read_spreadsheet(&self.path)
    }
}

pub fn table_source_for(path: &Path) -> Result<Box<dyn TableSource>> {
    let path = path.to_path_buf();
    Ok(match TableFormat::from_path(&path)? {
        TableFormat::Csv => Box::new(CsvTableSource { path }),
        TableFormat::Spreadsheet => Box::new(SpreadsheetTableSource { path }),
    })
}

/// Reads CSV with a header row; ragged rows are padded or truncated to the header width.
pub fn read_csv<R: io::Read>(reader: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let mut cells: Vec<CellValue> = record
            .iter()
            .map(|value| {
                if value.trim().is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::text(value)
                }
            })
            .collect();
        if cells.len() > headers.len() {
            warn!(row = index + 1, "csv row wider than header; extra cells ignored");
        }
        cells.resize(headers.len(), CellValue::Empty);
        rows.push(cells);
    }
    Ok(Table::new(headers, rows))
}

pub fn read_spreadsheet(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path).map_err(|err| {
        SourceError::Spreadsheet(format!("could not open {}: {err}", path.display()))
    })?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| SourceError::Spreadsheet(format!("{} has no sheets", path.display())))?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|err| SourceError::Spreadsheet(format!("sheet {sheet}: {err}")))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(|cell| cell_value(cell).as_text()).collect(),
        None => Vec::new(),
    };
    let body = rows
        .map(|row| {
            let mut cells: Vec<CellValue> = row.iter().map(cell_value).collect();
            cells.resize(headers.len(), CellValue::Empty);
            cells
        })
        .collect();
    Ok(Table::new(headers, body))
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Bool(value) => CellValue::Bool(*value),
        Data::Int(value) => CellValue::Int(*value),
        Data::Float(value) => CellValue::Float(*value),
        Data::String(value) if value.trim().is_empty() => CellValue::Empty,
        Data::String(value) => CellValue::Text(value.clone()),
        other => CellValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{read_csv, table_source_for, TableFormat};
    use crate::SourceError;
    use contactsift_core::CellValue;
    use std::path::Path;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            TableFormat::from_path(Path::new("people.CSV")).unwrap(),
            TableFormat::Csv
        );
        assert_eq!(
            TableFormat::from_path(Path::new("people.xlsx")).unwrap(),
            TableFormat::Spreadsheet
        );
        assert!(matches!(
            TableFormat::from_path(Path::new("people.txt")),
            Err(SourceError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn table_source_for_picks_reader() {
        let source = table_source_for(Path::new("people.ods")).expect("source");
        assert_eq!(source.source_name(), "spreadsheet");
    }

    #[test]
    fn read_csv_pads_ragged_rows() {
        let data = "Name,Phone\nAlice,123-456-7890\nFrank\nBob,555,extra\n";
        let table = read_csv(data.as_bytes()).expect("read");
        assert_eq!(table.headers, vec!["Name", "Phone"]);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[1], vec![CellValue::text("Frank"), CellValue::Empty]);
        assert_eq!(table.rows[2].len(), 2);
    }

    #[test]
    fn read_csv_handles_quoted_commas() {
        let data = "Name,Phone\n\"Doe, Jane\",\"(212) 555-1234\"\n";
        let table = read_csv(data.as_bytes()).expect("read");
        assert_eq!(table.cell(0, 0), Some(&CellValue::text("Doe, Jane")));
        assert_eq!(table.cell(0, 1), Some(&CellValue::text("(212) 555-1234")));
    }

    #[test]
    fn read_csv_empty_input_has_no_columns() {
        let table = read_csv("".as_bytes()).expect("read");
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }
}
