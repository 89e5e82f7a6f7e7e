use crate::commands::{print_json, Context};
use anyhow::Result;
use clap::Args;
use serde::Serialize;

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    #[arg(required = true)]
    pub phones: Vec<String>,
}

#[derive(Debug, Serialize)]
struct NormalizedPhone {
    input: String,
    phone: String,
}

pub fn normalize(ctx: &Context<'_>, args: NormalizeArgs) -> Result<()> {
    let results: Vec<NormalizedPhone> = args
        .phones
        .into_iter()
        .map(|input| {
            let phone = ctx.normalizer.normalize(&input);
            NormalizedPhone { input, phone }
        })
        .collect();

    if ctx.json {
        return print_json(&results);
    }

    for result in results {
        println!("{}", result.phone);
    }
    Ok(())
}
