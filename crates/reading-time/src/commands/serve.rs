//! Serve command: run the MCP server on stdio.

use clap::Args;
use reading_time_core::config::Config;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use crate::server::ReadingTimeServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Serve estimation tools over MCP until the client disconnects.
///
/// Logs go to stderr or the log file; stdout carries the protocol.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    _args: ServeArgs,
    max_input: Option<usize>,
    config: Config,
) -> anyhow::Result<()> {
    let server = ReadingTimeServer::new(config.estimate_config(), max_input);
    info!(wpm = config.estimate_config().wpm, "starting MCP server on stdio");

    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;

    info!("MCP server stopped");
    Ok(())
}
