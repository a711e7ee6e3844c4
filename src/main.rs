//! wcag-sweep main entry point
//!
//! This is the command-line interface for the wcag-sweep accessibility auditor.

use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use wcag_sweep::audit::{run_sweep, stop_on_ctrl_c};
use wcag_sweep::config::{load_config_with_hash, validate, Config};
use wcag_sweep::output::{write_reports, ReportFormat};
use wcag_sweep::{extract_urls_from_file, InputFormat, RemoteAuditor, SweepError};

/// wcag-sweep: accessibility sweeps driven by scan exports
///
/// Reads a URL list, a JSON scan export (such as an OWASP ZAP report) or an
/// HTML/XML document, audits every page found through an axe audit service,
/// and writes a scored report.
#[derive(Parser, Debug)]
#[command(name = "wcag-sweep")]
#[command(version)]
#[command(about = "Accessibility sweeps driven by scan exports", long_about = None)]
struct Cli {
    /// Input file (.txt, .json, .html, .xml, or anything else for a raw scan)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of pages to audit (0 = no cap)
    #[arg(long)]
    max_pages: Option<usize>,

    /// Seconds the audit service waits after page load
    #[arg(long)]
    page_wait: Option<u64>,

    /// Report file prefix
    #[arg(long)]
    out_prefix: Option<String>,

    /// Report format (html, markdown, json); repeat for several
    #[arg(long = "format", value_name = "FORMAT")]
    formats: Vec<String>,

    /// Extract and list the URLs that would be audited, then exit
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            match e.downcast_ref::<SweepError>() {
                Some(SweepError::EmptyExtraction { .. }) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wcag_sweep=info,warn"),
            1 => EnvFilter::new("wcag_sweep=debug,info"),
            2 => EnvFilter::new("wcag_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (cfg, hash) = load_config_with_hash(path).map_err(SweepError::from)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, Some(hash))
        }
        None => (Config::default(), None),
    };

    apply_overrides(&mut config, &cli);
    validate(&config).map_err(SweepError::from)?;

    let formats = config
        .output
        .formats
        .iter()
        .map(|f| f.parse::<ReportFormat>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(anyhow::Error::msg)?;

    let input = match cli.input.clone() {
        Some(path) => path,
        None => prompt_for_input()?,
    };

    if cli.dry_run {
        return handle_dry_run(&config, &input);
    }

    let auditor = RemoteAuditor::new(&config.auditor)?;
    tracing::info!("Audit service: {}", auditor.endpoint());

    let stop = stop_on_ctrl_c();
    let report = run_sweep(&input, &config.scan, &auditor, &stop)
        .await?
        .with_config_hash(config_hash);

    tracing::info!(
        "Overall score: {} ({} scored, {} failed)",
        report.overall_score,
        report.scored_count(),
        report.failed_count()
    );

    let written = write_reports(&report, &config.output.out_prefix, &formats)
        .map_err(SweepError::from)?;
    for path in &written {
        println!("Report: {}", path.display());
    }

    Ok(())
}

/// Command-line values take precedence over the config file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(max_pages) = cli.max_pages {
        config.scan.max_pages = max_pages;
    }
    if let Some(page_wait) = cli.page_wait {
        config.scan.page_wait = page_wait;
    }
    if let Some(prefix) = &cli.out_prefix {
        config.output.out_prefix = prefix.clone();
    }
    if !cli.formats.is_empty() {
        config.output.formats = cli.formats.clone();
    }
}

/// Asks for the input path on stdin
fn prompt_for_input() -> anyhow::Result<PathBuf> {
    print!("Path to the input file (.txt, .json, .html, .xml): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read input path")?;

    let path = line.trim().trim_matches(|c| c == '"' || c == '\'');
    if path.is_empty() {
        anyhow::bail!("No input file given");
    }
    Ok(PathBuf::from(path))
}

/// Handles the --dry-run mode: shows which URLs would be audited
fn handle_dry_run(config: &Config, input: &Path) -> anyhow::Result<()> {
    let format = InputFormat::from_path(input);
    let mut urls = extract_urls_from_file(input)?;
    if urls.is_empty() {
        return Err(SweepError::EmptyExtraction {
            path: input.to_path_buf(),
        }
        .into());
    }

    let found = urls.len();
    if config.scan.max_pages > 0 {
        urls.truncate(config.scan.max_pages);
    }

    println!("=== wcag-sweep Dry Run ===\n");
    println!("Input: {} ({})", input.display(), format);
    println!("Audit service: {}", config.auditor.endpoint);
    println!("Page wait: {}s", config.scan.page_wait);
    println!("\nURLs ({} of {} found):", urls.len(), found);
    for url in &urls {
        println!("  - {}", url);
    }

    Ok(())
}
