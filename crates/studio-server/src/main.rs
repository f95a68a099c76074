//! Code studio MCP server entry point.
//!
//! Serves the project tree to a language model over stdio.
//!
//! # Usage
//!
//! ```bash
//! code-studio
//! CODE_STUDIO_CONFIG=./studio.toml RUST_LOG=debug code-studio
//! ```
//!
//! Or configure in an MCP client:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "code-studio": {
//!       "command": "code-studio"
//!     }
//!   }
//! }
//! ```

use anyhow::Result;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use studio_server::{ProjectActions, StudioConfig, StudioService};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = StudioConfig::load(None)?;
    init_tracing(&config);

    tracing::info!("Starting code-studio v{}", env!("CARGO_PKG_VERSION"));

    let project = config.build_project()?;
    tracing::info!(
        files = project.file_count(),
        folders = project.folder_count(),
        "Project ready"
    );

    let service = StudioService::new(ProjectActions::new(project))
        .serve(stdio())
        .await?;
    service.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Logs go to stderr; stdout carries the MCP protocol.
fn init_tracing(config: &StudioConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{level},studio_server={level},studio_files={level}",
            level = config.general.log_level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .init();
    }
}
