//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use figma_fetch::config::DEFAULT_PROXY_PORT;

/// Fetch Figma design files and export their assets.
///
/// Documents are printed to stdout as JSON. Asset commands print the paths
/// written, with `""` for fill images whose reference could not be resolved.
#[derive(Parser, Debug)]
#[command(name = "figma-fetch")]
#[command(author, version, about)]
pub struct Args {
    /// Figma personal access token
    #[arg(long, env = "FIGMA_API_KEY", hide_env_values = true)]
    pub token: String,

    /// Forward proxy host to tunnel HTTPS traffic through (overrides PROXY_HOST)
    #[arg(long)]
    pub proxy_host: Option<String>,

    /// Forward proxy port (overrides PROXY_PORT)
    #[arg(long, requires = "proxy_host")]
    pub proxy_port: Option<u16>,

    /// Accept invalid TLS certificates on the proxy tunnel, for proxies that intercept TLS
    #[arg(long)]
    pub insecure: bool,

    /// Write raw and simplified snapshots to the logs directory
    #[arg(long)]
    pub dev: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Port to use when `--proxy-host` is given without `--proxy-port`.
    #[must_use]
    pub fn proxy_port_or_default(&self) -> u16 {
        self.proxy_port.unwrap_or(DEFAULT_PROXY_PORT)
    }
}

/// Operations exposed by the CLI.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch a whole design file
    File {
        /// File key from the Figma URL
        file_key: String,
        /// Maximum depth of the node tree
        #[arg(short, long)]
        depth: Option<u32>,
    },
    /// Fetch one node subtree
    Node {
        /// File key from the Figma URL
        file_key: String,
        /// Node id, e.g. `1:2`
        node_id: String,
        /// Maximum depth below the node
        #[arg(short, long)]
        depth: Option<u32>,
    },
    /// Export nodes as PNG/SVG and download them
    Images {
        /// File key from the Figma URL
        file_key: String,
        /// JSON array of `{nodeId, fileName, fileType}` requests
        #[arg(short, long)]
        requests: PathBuf,
        /// Destination directory
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Download fill images by image reference
    Fills {
        /// File key from the Figma URL
        file_key: String,
        /// JSON array of `{nodeId, fileName, imageRef}` requests
        #[arg(short, long)]
        requests: PathBuf,
        /// Destination directory
        #[arg(short, long)]
        out: PathBuf,
    },
}
