use crate::commands::{print_json, Context};
use crate::util::{read_upload, recognizer_from_config, resolve_strategies};
use anyhow::{Context as _, Result};
use clap::Args;
use contactsift_core::{process_batch, ResultRow};
use contactsift_sources::write_results_csv;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Image files, processed in the order given
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    /// Strategy to try, in priority order (repeatable)
    #[arg(long = "strategy")]
    pub strategies: Vec<String>,
    /// Also write the rows to this CSV file
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ExtractReport {
    results: Vec<ResultRow>,
}

pub fn extract(ctx: &Context<'_>, args: ExtractArgs) -> Result<()> {
    let recognizer = recognizer_from_config(ctx.config)?;
    let strategies = resolve_strategies(&args.strategies, &ctx.config.extract.strategies)?;

    let uploads = args.files.iter().map(|path| read_upload(path));
    let results = process_batch(&recognizer, uploads, &strategies, &ctx.normalizer);

    if let Some(out) = args.out.as_ref() {
        let file = File::create(out).with_context(|| format!("create {}", out.display()))?;
        write_results_csv(BufWriter::new(file), &results)
            .with_context(|| format!("write results to {}", out.display()))?;
    }

    if ctx.json {
        return print_json(&ExtractReport { results });
    }

    if results.is_empty() {
        println!("No contacts found.");
        return Ok(());
    }
    for row in &results {
        match row {
            ResultRow::Contact(contact) => println!(
                "{}\t{}\t{}\t{:.2}\t{}",
                contact.filename, contact.name, contact.phone, contact.confidence, contact.strategy
            ),
            ResultRow::Error(error) => println!("{}\terror: {}", error.filename, error.error),
        }
    }
    Ok(())
}
