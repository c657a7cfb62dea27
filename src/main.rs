//! CLI entry point for figma-fetch.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use figma_fetch::{ExportRequest, FigmaConfig, FigmaService, FillRequest, ProxyRoute};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

mod cli;

use cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = build_config(&args)?;
    debug!(?config, "configuration resolved");

    let service = FigmaService::new(config)?;

    let output = match &args.command {
        Command::File { file_key, depth } => service.get_file(file_key, *depth).await?,
        Command::Node {
            file_key,
            node_id,
            depth,
        } => service.get_node(file_key, node_id, *depth).await?,
        Command::Images {
            file_key,
            requests,
            out,
        } => {
            let requests: Vec<ExportRequest> = read_requests(requests)?;
            let paths = service.get_images(file_key, &requests, out).await?;
            info!(requested = requests.len(), written = paths.len(), "images exported");
            serde_json::to_value(paths_to_strings(paths.iter().map(|p| Some(p.as_path()))))?
        }
        Command::Fills {
            file_key,
            requests,
            out,
        } => {
            let requests: Vec<FillRequest> = read_requests(requests)?;
            let paths = service.get_image_fills(file_key, &requests, out).await?;
            serde_json::to_value(paths_to_strings(paths.iter().map(Option::as_deref)))?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Environment first, then command-line overrides.
fn build_config(args: &Args) -> Result<FigmaConfig> {
    let mut config = FigmaConfig::from_env(args.token.clone())?;
    if let Some(host) = &args.proxy_host {
        config.proxy = Some(ProxyRoute::new(host, args.proxy_port_or_default()));
    }
    if args.insecure {
        config.accept_invalid_certs = true;
    }
    if args.dev {
        config.dev_mode = true;
    }
    Ok(config)
}

fn read_requests<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading requests from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing requests in {}", path.display()))
}

/// Renders download results for output; a missing asset becomes `""`.
fn paths_to_strings<'a>(paths: impl Iterator<Item = Option<&'a Path>>) -> Vec<String> {
    paths
        .map(|path| path.map(|p| p.display().to_string()).unwrap_or_default())
        .collect()
}
