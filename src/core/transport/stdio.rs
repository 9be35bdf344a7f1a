//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP - the default and recommended mode.
//! One session runs for the lifetime of the process; logs go to stderr.

use tokio::io::BufReader;
use tracing::info;

use super::TransportResult;
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport until stdin closes or the client shuts down.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        server.session().run(reader, writer).await?;

        info!("STDIO transport finished");
        Ok(())
    }
}
