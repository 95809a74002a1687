mod load;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use cms_config_validation::{ValidationReport, collect_violations, config_schema};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Validate a CMS site configuration
#[derive(Parser, Debug)]
#[command(name = "validate-cms-config")]
#[command(version, about = "Validate CMS site configuration files", long_about = None)]
struct Args {
    /// Path to the site configuration (YAML, or JSON with a .json extension)
    #[arg(long, value_name = "FILE")]
    input: PathBuf,

    /// How to print the validation result
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable report on stderr
    Text,
    /// Machine-readable result on stdout
    Json,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "validate_cms_config=info,cms_config_validation=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Returns whether the configuration is valid
fn run(args: &Args) -> Result<bool> {
    let document = load::load_document(&args.input)?;
    debug!(input = %args.input.display(), "loaded site configuration");

    let report = ValidationReport::from_violations(collect_violations(&document, config_schema()));

    match args.format {
        OutputFormat::Text => {
            let text = text_output(&args.input, &report);
            if report.is_empty() {
                print!("{}", text);
            } else {
                eprint!("{}", text);
            }
        }
        OutputFormat::Json => {
            let rendered = serde_json::to_string_pretty(&json_output(&report))
                .context("Failed to serialize result")?;
            println!("{}", rendered);
        }
    }

    Ok(report.is_empty())
}

/// Machine-readable result: validity, sorted report lines, structured violations
fn json_output(report: &ValidationReport) -> Value {
    json!({
        "valid": report.is_empty(),
        "errors": report.lines(),
        "violations": report.violations(),
    })
}

/// Human-readable result; printed on stdout when valid and stderr otherwise
fn text_output(input: &Path, report: &ValidationReport) -> String {
    if report.is_empty() {
        return format!("✓ Configuration is valid\n  Input: {}\n", input.display());
    }

    let mut out = format!("Error: invalid site configuration ({})\n\n", input.display());
    for line in report.lines() {
        out.push_str(&format!("  ✖ {}\n", line));
    }
    out.push('\n');
    out
}
