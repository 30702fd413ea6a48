//! Sitebuilder MCP server binary.
//!
//! Usage:
//!   # Project under $XDG_DATA_HOME/sitebuilder/website
//!   cargo run -p sitebuilder-mcp
//!
//!   # Explicit directory with starter content
//!   cargo run -p sitebuilder-mcp -- --root ./website --scaffold starter
//!
//!   # In-memory mode (ephemeral)
//!   cargo run -p sitebuilder-mcp -- --memory
//!
//! Test with MCP inspector:
//!   npx @modelcontextprotocol/inspector cargo run -p sitebuilder-mcp

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use tracing_subscriber::{EnvFilter, fmt};

use sitebuilder_mcp::SiteBuilderMcp;
use sitebuilder_store::{ProjectStore, Scaffold, StoreConfig};

/// MCP server for a three-file website project.
#[derive(Parser, Debug)]
#[command(name = "sitebuilder-mcp")]
#[command(about = "MCP server for building index.html, styles.css and script.js")]
struct Args {
    /// Project directory (default: $XDG_DATA_HOME/sitebuilder/website)
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Keep the project in memory instead of on disk
    #[arg(short, long, conflicts_with = "root")]
    memory: bool,

    /// Content for newly created files: empty or starter
    #[arg(long, default_value = "empty")]
    scaffold: Scaffold,

    /// Do not create the project at startup; wait for ensure_website
    #[arg(long)]
    lazy: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing to stderr (MCP uses stdio for protocol)
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let args = Args::parse();

    let store = if args.memory {
        tracing::info!(scaffold = %args.scaffold, "Starting with in-memory store");
        ProjectStore::in_memory(args.scaffold)
    } else {
        let config = args
            .root
            .map(StoreConfig::new)
            .unwrap_or_default()
            .with_scaffold(args.scaffold);
        tracing::info!(root = %config.root.display(), scaffold = %args.scaffold, "Opening project");
        ProjectStore::open(&config).context("opening project store")?
    };

    if !args.lazy {
        let created = store.ensure().context("creating website project")?;
        tracing::info!(created = created.len(), "Project ready");
    }

    let mcp = SiteBuilderMcp::with_store(Arc::new(store));

    // Create and serve the MCP server
    let service = mcp
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("MCP server error: {:?}", e);
        })?;

    tracing::info!("sitebuilder-mcp server ready");

    // Wait for the service to complete
    service.waiting().await?;

    tracing::info!("sitebuilder-mcp server shutting down");
    Ok(())
}
