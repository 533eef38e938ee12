//! Pivot CLI
//!
//! Diffs, fingerprints, and lints table definitions serialized as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use sql_pivot::config::{OutputFormat, PivotConfig};
use sql_pivot::{diff, Fingerprint, Linter, Table};

#[derive(Parser)]
#[command(name = "pivot")]
#[command(about = "Diff, fingerprint, and lint SQL schema definitions")]
struct Cli {
    /// Path to a config file (defaults to pivot.toml if present)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two table definitions
    Diff {
        /// Expected-side table (JSON)
        left: PathBuf,
        /// Actual-side table (JSON)
        right: PathBuf,
        /// Suppress the line-oriented text diff
        #[arg(long)]
        no_text_diff: bool,
    },

    /// Print the fingerprint of a table definition
    Fingerprint {
        /// Table file (JSON)
        file: PathBuf,
    },

    /// Check a table against the producer obligations
    Check {
        /// Table file (JSON)
        file: PathBuf,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(clean) => {
            if !clean {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = PivotConfig::load_from(cli.config.as_deref())
        .context("failed to load configuration")?;
    debug!(?config, "loaded configuration");

    match cli.command {
        Commands::Diff {
            left,
            right,
            no_text_diff,
        } => {
            let expected = load_table(&left)?;
            let actual = load_table(&right)?;

            let expected_print = Fingerprint::of(&expected)?;
            if expected_print == Fingerprint::of(&actual)? {
                println!("✅ schemas match ({})", expected_print);
                return Ok(true);
            }

            let report = diff::diff_tables(&expected, &actual);
            let rendered = match config.diff.output_format {
                OutputFormat::Pretty => serde_json::to_string_pretty(&report)?,
                OutputFormat::Compact => serde_json::to_string(&report)?,
            };
            println!("{}", rendered);

            if config.diff.text_diff && !no_text_diff {
                print!("{}", diff::render_text_diff(&expected, &actual)?);
            }
            println!("❌ {}", report.summary);
            Ok(report.is_match)
        }

        Commands::Fingerprint { file } => {
            let table = load_table(&file)?;
            println!("{}  {}", Fingerprint::of(&table)?, table.name);
            Ok(true)
        }

        Commands::Check { file, strict } => {
            let table = load_table(&file)?;
            let mut linter = Linter::new();
            if strict || config.lint.strict {
                linter = linter.strict();
            }
            let report = linter.check_table(&table);

            for issue in &report.errors {
                println!("error[{}] {}: {}", issue.code, issue.path, issue.message);
            }
            for issue in &report.warnings {
                println!("warning[{}] {}: {}", issue.code, issue.path, issue.message);
            }
            if report.is_clean() && !report.has_warnings() {
                println!("✅ {} passes all checks", table.name);
            }
            Ok(report.is_clean())
        }
    }
}

fn load_table(path: &Path) -> anyhow::Result<Table> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse table definition in {}", path.display()))
}
