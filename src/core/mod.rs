//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server,
//! including error handling, configuration, the JSON-RPC protocol, sessions
//! and transport layer abstractions.

pub mod config;
pub mod error;
pub mod protocol;
pub mod server;
pub mod session;
pub mod transport;

pub use config::{Config, LoggingConfig, ToolsConfig};
pub use error::{Error, Result};
pub use server::McpServer;
pub use session::{Session, SessionState};
pub use transport::{TransportConfig, TransportService};
