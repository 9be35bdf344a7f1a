//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients to perform
//! specific actions or computations.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `schema.rs` / `descriptor.rs` - Tool metadata and argument schemas
//! - `validator.rs` - Schema validation producing typed argument bundles
//! - `registry.rs` - Ordered dispatch table (name -> descriptor + handler)
//! - `dispatcher.rs` - Lookup, validation and guarded handler invocation
//! - `router.rs` - Builds the registry with every shipped tool
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Define a params struct and implement `ToolHandler` and `ToolDefinition`
//! 3. Export it in `definitions/mod.rs`
//! 4. Register it in `router.rs`

pub mod content;
pub mod definitions;
pub mod descriptor;
pub mod dispatcher;
mod error;
pub mod handlers;
pub mod registry;
pub mod router;
pub mod schema;
pub mod validator;

pub use content::ContentBlock;
pub use descriptor::{ToolDescriptor, ToolListing};
pub use dispatcher::Dispatcher;
pub use error::{ArgumentError, HandlerError, ToolError};
pub use handlers::{HandlerResult, ToolDefinition, ToolHandler};
pub use registry::ToolRegistry;
pub use router::build_tool_registry;
pub use schema::{ArgKind, ArgumentSchema, Bound, FieldSpec};
pub use validator::{ArgValue, ArgumentBundle, ArgumentValidator, UnknownFieldPolicy};
