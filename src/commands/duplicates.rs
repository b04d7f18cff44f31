//! `casematch duplicates` - sweep all records for near-duplicate pairs

use std::path::Path;

use casematch_core::error::Result;
use casematch_core::format::{escape_quotes, OutputFormat};
use casematch_core::similarity::{find_all_duplicates, DuplicatePair};
use serde_json::json;
use tracing::debug;

use super::dispatch::{trace_command, CommandContext};
use super::input::load_documents;

/// Execute the duplicates command
pub fn execute(ctx: &CommandContext, input: &Path, threshold: Option<f64>) -> Result<()> {
    let threshold = threshold.unwrap_or(ctx.config.duplicates.threshold);

    let documents = load_documents(input)?;
    trace_command!(ctx.cli, ctx.start, "load_documents");

    let pairs = find_all_duplicates(&documents, threshold)?;
    debug!(
        documents = documents.len(),
        threshold,
        pairs = pairs.len(),
        "duplicates"
    );

    match ctx.cli.format {
        OutputFormat::Json => {
            let output: Vec<_> = pairs
                .iter()
                .map(|p| {
                    json!({
                        "first": p.first,
                        "second": p.second,
                        "score": p.score,
                        "percent": p.percent(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => output_human(ctx, &pairs),
        OutputFormat::Records => {
            println!(
                "H casematch=1 records=1 mode=duplicates documents={} threshold={} results={}",
                documents.len(),
                threshold,
                pairs.len()
            );
            for pair in &pairs {
                println!(
                    "D \"{}\" \"{}\" score={:.4} percent={}",
                    escape_quotes(&pair.first),
                    escape_quotes(&pair.second),
                    pair.score,
                    pair.percent()
                );
            }
        }
    }

    Ok(())
}

fn output_human(ctx: &CommandContext, pairs: &[DuplicatePair]) {
    if pairs.is_empty() {
        if !ctx.cli.quiet {
            println!("No duplicate records found");
        }
        return;
    }

    for pair in pairs {
        println!("{} <-> {}  {}%", pair.first, pair.second, pair.percent());
    }
}
