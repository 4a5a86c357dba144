//! `masc-server` — the MCP server binary for a MASC-MCP coordination room.
//!
//! Loads layered configuration, wires a [`masc_mcp::DispatchContext`] and
//! [`masc_mcp::Dispatcher`], and serves JSON-RPC 2.0 over stdio until the
//! peer closes the pipe.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use masc_mcp::{Dispatcher, TransportMode as McpTransportMode};
use masc_server::context::{apply_auth_config, build_dispatch_context};
use masc_server::transport::serve_stdio;

/// Command-line arguments for `masc-server`.
#[derive(Debug, Parser)]
#[command(name = "masc-server", about = "MCP server for a MASC-MCP coordination room")]
struct Cli {
    /// Workspace root whose `.masc/config.toml` (if any) layers over the
    /// system and user configuration. Defaults to the current directory.
    #[arg(long, value_name = "DIR")]
    workspace: Option<PathBuf>,

    /// Overrides `masc.base_path`: where the room's filesystem backend is
    /// rooted. Without this (and without a config file setting it), the
    /// room lives entirely in memory and is lost when the process exits.
    #[arg(long, value_name = "DIR")]
    base_path: Option<PathBuf>,

    /// Loads configuration from exactly this file instead of the layered
    /// system/user/workspace/env chain.
    #[arg(long, value_name = "FILE", conflicts_with = "workspace")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = masc_telemetry::setup_default_logging() {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "masc-server exiting after a fatal error");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => masc_config::Config::load_file(path).with_context(|| format!("loading config file {}", path.display()))?,
        None => masc_config::Config::load(cli.workspace.as_deref()).context("loading layered configuration")?,
    };
    if let Some(base_path) = cli.base_path {
        config.masc.base_path = Some(base_path);
    }

    tracing::info!(
        base_path = ?config.masc.base_path,
        auth_enabled = config.masc.auth.enabled,
        transport_mode = ?config.masc.transport.mode,
        "masc-server starting"
    );

    let ctx = build_dispatch_context(&config);
    apply_auth_config(&ctx, &config).await.context("applying auth configuration")?;

    let dispatcher = Arc::new(match &config.masc.base_path {
        Some(base_path) => Dispatcher::with_worktree_base_path(base_path.join("worktrees")),
        None => Dispatcher::new(),
    });

    let forced_mode = match config.masc.transport.mode {
        masc_config::TransportMode::Stdio => None,
        masc_config::TransportMode::Framed => Some(McpTransportMode::Framed),
        masc_config::TransportMode::Line => Some(McpTransportMode::LineDelimited),
    };

    serve_stdio(ctx, dispatcher, forced_mode).await.context("serving stdio transport")?;
    tracing::info!("masc-server shutting down cleanly");
    Ok(())
}
