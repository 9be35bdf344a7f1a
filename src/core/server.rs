//! MCP server state shared by every session.
//!
//! The server owns the configuration and the tool registry built at
//! startup. Transports ask it for a fresh [`Session`] per client; the
//! registry is shared read-only between them.

use std::sync::Arc;

use tracing::info;

use super::config::Config;
use super::error::{Error, Result};
use super::session::Session;
use crate::domains::tools::{ToolRegistry, build_tool_registry};

/// Startup-time server state.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Dispatch table with every registered tool.
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a server with the built-in tool catalog.
    pub fn new(config: Config) -> Result<Self> {
        let registry = build_tool_registry()?;
        Self::with_registry(config, registry)
    }

    /// Create a server over a caller-supplied registry.
    pub fn with_registry(config: Config, registry: ToolRegistry) -> Result<Self> {
        if config.server.name.trim().is_empty() {
            return Err(Error::config("server name must not be empty"));
        }

        info!(
            "{} v{} ready with {} tools",
            config.server.name,
            config.server.version,
            registry.len()
        );

        Ok(Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Start a new session in the handshake state.
    pub fn session(&self) -> Session {
        Session::new(self.config.clone(), self.registry.clone())
    }
}
