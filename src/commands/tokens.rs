//! `casematch tokens` - show how a text is normalized

use casematch_core::error::Result;
use casematch_core::format::{escape_quotes, OutputFormat};
use casematch_core::text::normalize;

use crate::cli::Cli;

/// Execute the tokens command
pub fn execute(cli: &Cli, text: &str) -> Result<()> {
    let tokens = normalize(text);

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        }
        OutputFormat::Human => {
            if tokens.is_empty() {
                if !cli.quiet {
                    println!("No tokens");
                }
            } else {
                println!("{}", tokens.join(" "));
            }
        }
        OutputFormat::Records => {
            println!(
                "H casematch=1 records=1 mode=tokens text=\"{}\" results={}",
                escape_quotes(text),
                tokens.len()
            );
            for token in &tokens {
                println!("T {}", token);
            }
        }
    }

    Ok(())
}
