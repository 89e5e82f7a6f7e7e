use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::{image_files, read_upload, recognizer_from_config};
use anyhow::{Context as _, Result};
use clap::Args;
use contactsift_core::{process_upload, ImageOutcome, SeenPhones};
use contactsift_sources::write_phone_list;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::warn;

const DEFAULT_OUTPUT: &str = "extracted_numbers.txt";

#[derive(Debug, Args)]
pub struct ScanDirArgs {
    /// Directory holding the images
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,
    /// Newline-delimited phone list to write
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub out: PathBuf,
    /// Skip phones with fewer digits (defaults to extract.scan_min_digits)
    #[arg(long)]
    pub min_digits: Option<usize>,
}

#[derive(Debug, Serialize)]
struct FileScan {
    filename: String,
    strategy: Option<String>,
    phones: Vec<String>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct ScanReport {
    files: Vec<FileScan>,
    phones: Vec<String>,
    output: String,
}

pub fn scan_dir(ctx: &Context<'_>, args: ScanDirArgs) -> Result<()> {
    let min_digits = args.min_digits.unwrap_or(ctx.config.extract.scan_min_digits);
    if min_digits == 0 {
        return Err(invalid_input("--min-digits must be at least 1"));
    }
    let recognizer = recognizer_from_config(ctx.config)?;
    let strategies = &ctx.config.extract.scan_strategies;

    let mut seen = SeenPhones::new();
    let mut phones = Vec::new();
    let mut files = Vec::new();

    for path in image_files(&args.dir)? {
        let outcome = process_upload(&recognizer, read_upload(&path), strategies, &ctx.normalizer);
        let scan = match outcome {
            ImageOutcome::Failed { filename, error } => {
                warn!(file = %filename, %error, "image skipped");
                FileScan {
                    filename,
                    strategy: None,
                    phones: Vec::new(),
                    error: Some(error),
                }
            }
            ImageOutcome::Selected {
                filename,
                selection,
            } => {
                let strategy = selection.strategy_tag().to_string();
                let found: Vec<String> = selection
                    .into_candidates()
                    .into_iter()
                    .map(|candidate| candidate.phone)
                    .filter(|phone| phone.len() >= min_digits)
                    .collect();
                for phone in &found {
                    if seen.insert(phone) {
                        phones.push(phone.clone());
                    }
                }
                FileScan {
                    filename,
                    strategy: Some(strategy),
                    phones: found,
                    error: None,
                }
            }
        };
        if !ctx.json {
            print_file_scan(&scan);
        }
        files.push(scan);
    }

    let file =
        File::create(&args.out).with_context(|| format!("create {}", args.out.display()))?;
    write_phone_list(BufWriter::new(file), &phones)
        .with_context(|| format!("write phone list to {}", args.out.display()))?;

    if ctx.json {
        return print_json(&ScanReport {
            files,
            phones,
            output: args.out.display().to_string(),
        });
    }

    println!(
        "Saved {} unique numbers from {} files to {}",
        phones.len(),
        files.len(),
        args.out.display()
    );
    Ok(())
}

fn print_file_scan(scan: &FileScan) {
    if let Some(error) = &scan.error {
        println!("{}: error: {}", scan.filename, error);
    } else if scan.phones.is_empty() {
        println!("{}: no numbers", scan.filename);
    } else {
        println!("{}: {}", scan.filename, scan.phones.join(", "));
    }
}
