mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand, ValueEnum};
use contactsift_core::{NanpTrunkPolicy, PhoneNormalizer};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{completions, dataset, extract, normalize, scan, Context};
use crate::error::{exit_code_for, report_error};
use contactsift_config as config;

#[derive(Debug, Parser)]
#[command(
    name = "contactsift",
    version,
    about = "Extract and normalize phone numbers from contact scans and spreadsheets"
)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    /// How 10-digit numbers without a country code are canonicalized
    #[arg(long, global = true, value_enum)]
    nanp_trunk: Option<TrunkArg>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TrunkArg {
    Retain,
    StripImplicit,
}

impl From<TrunkArg> for NanpTrunkPolicy {
    fn from(arg: TrunkArg) -> Self {
        match arg {
            TrunkArg::Retain => NanpTrunkPolicy::Retain,
            TrunkArg::StripImplicit => NanpTrunkPolicy::StripImplicit,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the canonical form of each phone number
    Normalize(normalize::NormalizeArgs),
    /// Extract contacts from image files through the configured recognizer
    Extract(extract::ExtractArgs),
    /// Collect unique phone numbers from every image in a directory
    #[command(name = "scan-dir")]
    ScanDir(scan::ScanDirArgs),
    /// Normalize and deduplicate the phone column of a CSV or spreadsheet
    Dataset(dataset::DatasetArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        json,
        verbose,
        nanp_trunk,
        command,
    } = cli;

    let command = match command {
        Command::Completions(args) => return completions::emit(args),
        command => command,
    };

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }

    let policy = nanp_trunk
        .map(NanpTrunkPolicy::from)
        .unwrap_or(app_config.nanp_trunk);
    debug!(policy = policy.as_str(), "nanp trunk policy");

    let ctx = Context {
        json,
        config: &app_config,
        normalizer: PhoneNormalizer::new(policy),
    };

    match command {
        Command::Normalize(args) => normalize::normalize(&ctx, args),
        Command::Extract(args) => extract::extract(&ctx, args),
        Command::ScanDir(args) => scan::scan_dir(&ctx, args),
        Command::Dataset(args) => dataset::dataset(&ctx, args),
        Command::Completions(_) => {
            unreachable!("completions command handled before config load")
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
