//! nodescrape: convert a node-addressed hypertext manual into Markdown.
//!
//! Without `--config`, the built-in Hardware Manual guide library set is used.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use nodescrape::config::{ManualConfig, SlugCollisionPolicy};

#[derive(Debug, Parser)]
#[command(name = "nodescrape", version, about)]
struct Cli {
    /// JSON configuration file (libraries, URL template, limits)
    #[arg(long, short, env = "NODESCRAPE_CONFIG")]
    config: Option<PathBuf>,

    /// Output root directory
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Library to render (must be configured)
    #[arg(long, short)]
    library: Option<String>,

    /// Number of crawl levels to render
    #[arg(long, conflicts_with = "unbounded")]
    max_depth: Option<u8>,

    /// Keep crawling until no new page is discovered
    #[arg(long)]
    unbounded: bool,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Retries for transient fetch failures
    #[arg(long)]
    retries: Option<u8>,

    /// Requests per second, 0 disables pacing
    #[arg(long)]
    rate: Option<f64>,

    /// Suffix colliding slugs with their node id instead of overwriting
    #[arg(long)]
    disambiguate_slugs: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

#[tokio::main]
async fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("nodescrape=debug")
        } else {
            EnvFilter::new("nodescrape=info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = build_config(&cli)?;
    let summary = nodescrape::convert(config)
        .await
        .context("conversion failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{}: {} page(s) written, {} left unrendered, {} slug collision(s)",
            summary.library,
            summary.pages_rendered(),
            summary.unrendered.len(),
            summary.collisions.len()
        );
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<ManualConfig> {
    let base = match &cli.config {
        Some(path) => ManualConfig::from_json_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ManualConfig::default(),
    };

    let mut builder = base.into_builder();
    if let Some(output) = &cli.output {
        builder = builder.replace_output_root(output);
    }
    if let Some(library) = &cli.library {
        builder = builder.replace_target_library(library);
    }
    if cli.unbounded {
        builder = builder.max_depth(None);
    } else if let Some(depth) = cli.max_depth {
        builder = builder.max_depth(Some(depth));
    }
    if let Some(timeout) = cli.timeout {
        builder = builder.request_timeout_secs(timeout);
    }
    if let Some(retries) = cli.retries {
        builder = builder.max_retries(retries);
    }
    if let Some(rate) = cli.rate {
        builder = builder.crawl_rate_rps((rate > 0.0).then_some(rate));
    }
    if cli.disambiguate_slugs {
        builder = builder.slug_collision_policy(SlugCollisionPolicy::SuffixNodeId);
    }

    Ok(builder.build()?)
}
