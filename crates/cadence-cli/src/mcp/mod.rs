//! MCP server implementation for Cadence
//!
//! This module exposes the sequencer controls as Model Context Protocol
//! tools. Control tools only acknowledge; the `snapshot` tool reports where
//! the run stands.

use anyhow::Result;
use cadence_core::{display::Acknowledgement, Action, SequencerController};
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;

use errors::to_mcp_error;

pub type McpResult = std::result::Result<CallToolResult, McpError>;

/// Format of the `snapshot` tool output
#[derive(Debug, Default, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    /// Markdown step list
    #[default]
    Markdown,
    /// Serialized snapshot
    Json,
}

/// Parameters of the `snapshot` tool
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct SnapshotParams {
    /// Output format, `markdown` (default) or `json`
    #[serde(default)]
    pub format: SnapshotFormat,
}

/// MCP server for Cadence
#[derive(Clone)]
pub struct CadenceMcpServer {
    controller: SequencerController,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CadenceMcpServer {
    /// Create a new Cadence MCP server
    pub fn new(controller: SequencerController) -> Self {
        Self {
            controller,
            tool_router: Self::tool_router(),
        }
    }

    async fn acknowledge(&self, action: Action) -> McpResult {
        debug!("{action} requested over MCP");
        let snapshot = self.controller.apply(action).await;
        Ok(CallToolResult::success(vec![Content::text(
            Acknowledgement::new(action, &snapshot).to_string(),
        )]))
    }

    #[tool(
        name = "play",
        description = "Start or resume the step sequence. Steps advance one at a time on a fixed interval. If the run already finished, it restarts from the first step. Does nothing while already running."
    )]
    async fn play(&self) -> McpResult {
        self.acknowledge(Action::Play).await
    }

    #[tool(
        name = "pause",
        description = "Pause the step sequence at its current step. The next play resumes from the same step without skipping or repeating. Does nothing unless running."
    )]
    async fn pause(&self) -> McpResult {
        self.acknowledge(Action::Pause).await
    }

    #[tool(
        name = "reset",
        description = "Stop the step sequence and mark every step pending again. Safe to call in any state."
    )]
    async fn reset(&self) -> McpResult {
        self.acknowledge(Action::Reset).await
    }

    #[tool(
        name = "toggle",
        description = "Pause the step sequence if it is running, play it if it is idle or paused. Does nothing once the run finished; use reset or play to start over."
    )]
    async fn toggle(&self) -> McpResult {
        self.acknowledge(Action::Toggle).await
    }

    #[tool(
        name = "snapshot",
        description = "Show every step with its status (pending, active or completed), how many ticks have fired and whether the sequence is playing. Use format='json' for a machine-readable snapshot."
    )]
    async fn snapshot(&self, Parameters(params): Parameters<SnapshotParams>) -> McpResult {
        let snapshot = self.controller.snapshot().await;
        let text = match params.format {
            SnapshotFormat::Markdown => snapshot.to_string(),
            SnapshotFormat::Json => serde_json::to_string_pretty(&snapshot)
                .map_err(|e| to_mcp_error("Failed to serialize snapshot", e))?,
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for CadenceMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "cadence".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(r#"Cadence is a timed step-sequencer. It walks an ordered list of steps one tick at a time: the current step is active, earlier steps are completed and later steps are pending.

## Tools
- `play`: start or resume; restarts from the first step after the run finished
- `pause`: stop at the current step
- `toggle`: pause when running, play when idle or paused; ignored once finished
- `reset`: stop and mark every step pending
- `snapshot`: show every step with its status

Control tools never fail; calling one that does not apply (for example `pause` while idle) is acknowledged with the unchanged state."#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: CadenceMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Cadence MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    // Set up signal handlers for graceful shutdown
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
