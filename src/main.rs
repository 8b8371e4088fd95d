//! pdffold - Merge folders of PDF files into per-folder documents.

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use pdffold::cli::{Cli, MergeCommand};
use pdffold::error::PdfFoldError;
use pdffold::merge::{self, MergeOutcome};
use pdffold::output::OutputFormatter;
use pdffold::utils::sanitize_path;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfFoldError> {
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);

    let command = match cli.command {
        Some(command) => command,
        None => prompt_menu()?,
    };

    let outcomes = match command {
        MergeCommand::Pair { first, second } => {
            vec![merge::merge_pair(&first, &second, &formatter).await?]
        }
        MergeCommand::Tree { root } => merge::merge_tree(&root, &config, &formatter).await?,
    };

    if config.json {
        print_json_summary(&outcomes)?;
    }

    Ok(())
}

/// Interactive fallback when no subcommand was given: a two-entry menu
/// read from stdin, with pasted paths sanitized before use.
fn prompt_menu() -> Result<MergeCommand, PdfFoldError> {
    println!("Choose an option:");
    println!("1. Merge exactly two PDFs");
    println!("2. Merge all PDFs in subfolders of a top-level folder");

    let choice = prompt_line("Enter your choice (1 or 2): ")?;

    match choice.trim() {
        "1" => {
            let first = prompt_path("Enter the path of the first PDF: ")?;
            let second = prompt_path("Enter the path of the second PDF: ")?;
            Ok(MergeCommand::Pair { first, second })
        }
        "2" => {
            let root = prompt_path("Enter the top-level folder path: ")?;
            Ok(MergeCommand::Tree { root })
        }
        other => Err(PdfFoldError::InvalidChoice {
            input: other.to_string(),
        }),
    }
}

fn prompt_line(prompt: &str) -> Result<String, PdfFoldError> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

fn prompt_path(prompt: &str) -> Result<PathBuf, PdfFoldError> {
    let raw = prompt_line(prompt)?;
    Ok(PathBuf::from(sanitize_path(&raw)))
}

/// Emit a machine-readable run summary on stdout.
fn print_json_summary(outcomes: &[MergeOutcome]) -> Result<(), PdfFoldError> {
    let rendered = serde_json::to_string_pretty(outcomes)
        .map_err(|e| PdfFoldError::other(format!("Failed to render JSON summary: {e}")))?;
    println!("{rendered}");
    Ok(())
}
