//! Marketing MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server exposing a
//! catalog of digital-marketing tools over newline-delimited JSON-RPC.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the JSON-RPC protocol, sessions
//!   and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: schemas, validation, the registry, dispatch and the tool catalog
//!
//! # Example
//!
//! ```rust,no_run
//! use marketing_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
