//! `casematch similar` - rank records against one query record

use std::path::Path;

use casematch_core::bail_usage;
use casematch_core::error::{CaseMatchError, Result};
use casematch_core::format::{escape_quotes, OutputFormat};
use casematch_core::similarity::{find_similar_with_options, SimilarOptions, SimilarityResult};
use serde_json::json;
use tracing::debug;

use super::dispatch::{trace_command, CommandContext};
use super::input::load_documents;

/// Execute the similar command
pub fn execute(
    ctx: &CommandContext,
    input: &Path,
    query: &str,
    threshold: Option<f64>,
    limit: Option<usize>,
) -> Result<()> {
    let options = resolve_options(ctx, threshold, limit)?;

    let documents = load_documents(input)?;
    trace_command!(ctx.cli, ctx.start, "load_documents");

    let query_doc = documents
        .iter()
        .find(|doc| doc.id == query)
        .ok_or_else(|| CaseMatchError::not_found("document", query))?;

    let results = find_similar_with_options(query_doc, &documents, &options);
    debug!(
        query,
        threshold = options.threshold,
        results = results.len(),
        "similar"
    );

    match ctx.cli.format {
        OutputFormat::Json => output_json(&results)?,
        OutputFormat::Human => output_human(ctx, &results),
        OutputFormat::Records => output_records(query, &options, &results),
    }

    Ok(())
}

fn resolve_options(
    ctx: &CommandContext,
    threshold: Option<f64>,
    limit: Option<usize>,
) -> Result<SimilarOptions> {
    if limit == Some(0) {
        bail_usage!("--limit must be at least 1");
    }

    let mut options = ctx.config.similar_options();
    if let Some(threshold) = threshold {
        options.threshold = threshold;
    }
    if limit.is_some() {
        options.limit = limit;
    }
    Ok(options)
}

fn output_json(results: &[SimilarityResult]) -> Result<()> {
    let output: Vec<_> = results
        .iter()
        .map(|r| {
            json!({
                "id": r.id,
                "score": r.score,
                "percent": r.percent(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_human(ctx: &CommandContext, results: &[SimilarityResult]) {
    if results.is_empty() {
        if !ctx.cli.quiet {
            println!("No similar records found");
        }
        return;
    }

    for result in results {
        println!("{}  {}%", result.id, result.percent());
    }
}

fn output_records(query: &str, options: &SimilarOptions, results: &[SimilarityResult]) {
    println!(
        "H casematch=1 records=1 mode=similar query=\"{}\" threshold={} results={}",
        escape_quotes(query),
        options.threshold,
        results.len()
    );
    for result in results {
        println!(
            "R \"{}\" score={:.4} percent={}",
            escape_quotes(&result.id),
            result.score,
            result.percent()
        );
    }
}
