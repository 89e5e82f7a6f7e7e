use crate::table::TableFormat;
use crate::{Result, SourceError};
use contactsift_core::{CellValue, NormalizedTable, ResultRow};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

const RESULT_HEADERS: [&str; 6] = ["filename", "name", "phone", "confidence", "strategy", "error"];

/// Writes the normalized table in the format named by the path's extension.
pub fn write_normalized_table(path: &Path, table: &NormalizedTable) -> Result<()> {
    match TableFormat::from_path(path)? {
        TableFormat::Csv => {
            let file = File::create(path)?;
            write_table_csv(BufWriter::new(file), table)
        }
        TableFormat::Spreadsheet => write_table_xlsx(path, table),
    }?;
    debug!(path = %path.display(), rows = table.rows.len(), "table written");
    Ok(())
}

pub fn write_table_csv<W: Write>(writer: W, table: &NormalizedTable) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(table.output_headers())?;
    for row in &table.rows {
        let record = row
            .cells
            .iter()
            .map(CellValue::as_text)
            .chain(std::iter::once(row.normalized_phone.clone()));
        writer.write_record(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes an `.xlsx` workbook with a bold header row; the phone column is stored as text.
pub fn write_table_xlsx(path: &Path, table: &NormalizedTable) -> Result<()> {
    if !path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
    {
        return Err(SourceError::UnsupportedFormat(path.to_path_buf()));
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header_format = Format::new().set_bold();

    for (col, header) in table.output_headers().iter().enumerate() {
        worksheet
            .write_string_with_format(0, column_index(col)?, header, &header_format)
            .map_err(xlsx_error)?;
    }

    for (index, row) in table.rows.iter().enumerate() {
        let row_num = u32::try_from(index + 1)
            .map_err(|_| SourceError::Spreadsheet("too many rows for a worksheet".to_string()))?;
        for (col, cell) in row.cells.iter().enumerate() {
            write_cell(worksheet, row_num, column_index(col)?, cell).map_err(xlsx_error)?;
        }
        worksheet
            .write_string(row_num, column_index(row.cells.len())?, &row.normalized_phone)
            .map_err(xlsx_error)?;
    }

    workbook.save(path).map_err(xlsx_error)?;
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
) -> std::result::Result<(), XlsxError> {
    match cell {
        CellValue::Empty => {}
        CellValue::Bool(value) => {
            worksheet.write_boolean(row, col, *value)?;
        }
        CellValue::Int(value) => {
            worksheet.write_number(row, col, *value as f64)?;
        }
        CellValue::Float(value) => {
            worksheet.write_number(row, col, *value)?;
        }
        CellValue::Text(value) => {
            worksheet.write_string(row, col, value)?;
        }
    }
    Ok(())
}

fn column_index(col: usize) -> Result<u16> {
    u16::try_from(col)
        .map_err(|_| SourceError::Spreadsheet("too many columns for a worksheet".to_string()))
}

fn xlsx_error(err: XlsxError) -> SourceError {
    SourceError::Spreadsheet(err.to_string())
}

/// Flat CSV of batch results; contact rows leave `error` blank, error rows leave the rest blank.
pub fn write_results_csv<W: Write>(writer: W, rows: &[ResultRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(RESULT_HEADERS)?;
    for row in rows {
        match row {
            ResultRow::Contact(contact) => {
                let confidence = format!("{:.2}", contact.confidence);
                writer.write_record([
                    contact.filename.as_str(),
                    contact.name.as_str(),
                    contact.phone.as_str(),
                    confidence.as_str(),
                    contact.strategy.as_str(),
                    "",
                ])?
            }
            ResultRow::Error(error) => writer.write_record([
                error.filename.as_str(),
                "",
                "",
                "",
                "",
                error.error.as_str(),
            ])?,
        }
    }
    writer.flush()?;
    Ok(())
}

/// One phone per line, in the order given.
pub fn write_phone_list<W, I, S>(mut writer: W, phones: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for phone in phones {
        writeln!(writer, "{}", phone.as_ref())?;
    }
    writer.flush()
}
