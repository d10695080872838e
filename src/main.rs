// Copyright 2026 Pagesift Contributors
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use pagesift::export;
use pagesift::extract::{scrape_html, ScrapeMode, SelectorHints};
use pagesift::fetch::PageFetcher;
use pagesift::rest::{self, AppState};

#[derive(Parser)]
#[command(
    name = "pagesift",
    about = "pagesift, a heuristic HTML record extractor",
    version,
    after_help = "Run 'pagesift <command> --help' for details on each command."
)]
struct Cli {
    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP scraping API
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "3001")]
        port: u16,
    },
    /// Fetch one page and print the extracted records
    Scrape {
        /// Page URL to scrape
        url: String,
        /// Selector hint, repeatable (e.g. --selector title=.headline)
        #[arg(long = "selector", value_name = "FIELD=CSS")]
        selectors: Vec<String>,
        /// Explicit extraction mode discriminator
        #[arg(long, value_enum)]
        data_type: Option<DataType>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        /// Write the output to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DataType {
    Match,
    Statistics,
}

impl DataType {
    fn as_str(self) -> &'static str {
        match self {
            DataType::Match => "match",
            DataType::Statistics => "statistics",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// JSON export envelope with metadata
    Json,
    /// Plain-text report, one block per record
    Report,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Serve { port } => {
            info!("starting pagesift v{}", env!("CARGO_PKG_VERSION"));
            rest::start(port, Arc::new(AppState::new())).await
        }
        Commands::Scrape {
            url,
            selectors,
            data_type,
            format,
            output,
        } => scrape_once(url, selectors, data_type, format, output).await,
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "pagesift=debug" } else { "pagesift=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.parse().expect("static directive parses")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn scrape_once(
    url: String,
    selectors: Vec<String>,
    data_type: Option<DataType>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    if url::Url::parse(&url).is_err() {
        bail!("'{url}' is not a valid URL");
    }

    let hints = parse_selector_flags(&selectors)?;
    let mode = ScrapeMode::detect(data_type.map(DataType::as_str), &hints);

    let fetcher = PageFetcher::new();
    let html = fetcher.fetch(&url).await?;

    let page_url = url.clone();
    let hints_for_pass = hints.clone();
    let records =
        tokio::task::spawn_blocking(move || scrape_html(&html, &page_url, &hints_for_pass, mode))
            .await
            .context("extraction task failed")?;

    info!(count = records.len(), "extracted records");

    let rendered = match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&export::json_report(&records, &url))?
        }
        OutputFormat::Report => export::text_report(&records, &url),
    };

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("wrote {} records to {}", records.len(), path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

/// Parse repeated `--selector field=css` flags into hints.
fn parse_selector_flags(flags: &[String]) -> Result<SelectorHints> {
    let mut hints = SelectorHints::default();
    for flag in flags {
        let Some((field, selector)) = flag.split_once('=') else {
            bail!("--selector expects FIELD=CSS, got '{flag}'");
        };
        hints
            .set(field.trim(), selector)
            .map_err(|e| anyhow::anyhow!(e))?;
    }
    Ok(hints)
}
