use anyhow::Result;
use contactsift_config::AppConfig;
use contactsift_core::PhoneNormalizer;
use serde::Serialize;
use std::io::{self, Write};

pub mod completions;
pub mod dataset;
pub mod extract;
pub mod normalize;
pub mod scan;

pub struct Context<'a> {
    pub json: bool,
    pub config: &'a AppConfig,
    pub normalizer: PhoneNormalizer,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
