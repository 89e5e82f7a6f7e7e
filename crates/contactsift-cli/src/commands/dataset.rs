use crate::commands::{print_json, Context};
use anyhow::{Context as _, Result};
use clap::Args;
use contactsift_core::normalize_table;
use contactsift_sources::{table_source_for, write_normalized_table, TableFormat};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Args)]
pub struct DatasetArgs {
    /// CSV, XLSX, XLS or ODS file with a header row
    pub file: PathBuf,
    /// Output path; defaults to processed_<name> next to the input
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct DatasetReport {
    input: String,
    output: String,
    phone_column: String,
    rows: usize,
    dropped_blank: usize,
    dropped_duplicate: usize,
    phones: Vec<String>,
}

pub fn dataset(ctx: &Context<'_>, args: DatasetArgs) -> Result<()> {
    let source = table_source_for(&args.file)?;
    let table = source
        .fetch_table()
        .with_context(|| format!("read {}", args.file.display()))?;
    debug!(
        source = source.source_name(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "table loaded"
    );

    let normalized = normalize_table(table, &ctx.config.dataset.phone_keywords, &ctx.normalizer)?;

    let out = match args.out {
        Some(path) => path,
        None => default_output_path(&args.file)?,
    };
    write_normalized_table(&out, &normalized)
        .with_context(|| format!("write {}", out.display()))?;

    let report = DatasetReport {
        input: args.file.display().to_string(),
        output: out.display().to_string(),
        phone_column: normalized.phone_column.clone(),
        rows: normalized.rows.len(),
        dropped_blank: normalized.dropped_blank,
        dropped_duplicate: normalized.dropped_duplicate,
        phones: normalized.phones().map(str::to_string).collect(),
    };

    if ctx.json {
        return print_json(&report);
    }

    println!(
        "Phone column: {}\nKept {} rows ({} blank, {} duplicate dropped)\nSaved to {}",
        report.phone_column,
        report.rows,
        report.dropped_blank,
        report.dropped_duplicate,
        report.output
    );
    Ok(())
}

/// `processed_<stem>.csv` for CSV input, `processed_<stem>.xlsx` for spreadsheets.
fn default_output_path(input: &Path) -> Result<PathBuf> {
    let extension = match TableFormat::from_path(input)? {
        TableFormat::Csv => "csv",
        TableFormat::Spreadsheet => "xlsx",
    };
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    let name = format!("processed_{stem}.{extension}");
    Ok(match input.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    })
}

#[cfg(test)]
mod tests {
    use super::default_output_path;
    use std::path::{Path, PathBuf};

    #[test]
    fn default_output_keeps_csv_and_upgrades_spreadsheets() {
        assert_eq!(
            default_output_path(Path::new("data/people.csv")).unwrap(),
            PathBuf::from("data/processed_people.csv")
        );
        assert_eq!(
            default_output_path(Path::new("people.xls")).unwrap(),
            PathBuf::from("processed_people.xlsx")
        );
        assert!(default_output_path(Path::new("people.json")).is_err());
    }
}
