//! MCP server implementation for the course assistant.
//!
//! This module provides the MCP protocol server that exposes course content
//! search to AI assistants through the Model Context Protocol.

pub mod handlers;

pub use handlers::CourseAssistantServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the course assistant MCP server with stdio transport.
///
/// This function starts the MCP server and runs it until completion.
/// It communicates via stdin/stdout using the MCP protocol.
pub async fn run_server(server: CourseAssistantServer) -> Result<()> {
    let service = server.serve(stdio()).await?;

    service.waiting().await?;

    Ok(())
}
