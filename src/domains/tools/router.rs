//! Tool Router - builds the dispatch table with every shipped tool.
//!
//! Adding a tool only touches this file and `definitions/`; the protocol
//! loop never needs to change.

use tracing::info;

use super::definitions::{
    CalendarTool, ContentIdeasTool, EngagementTool, HashtagsTool, PerformanceTool,
};
use super::error::ToolError;
use super::registry::ToolRegistry;

/// Build the tool registry with all registered tools, in listing order.
pub fn build_tool_registry() -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();
    registry.register_definition::<ContentIdeasTool>()?;
    registry.register_definition::<HashtagsTool>()?;
    registry.register_definition::<CalendarTool>()?;
    registry.register_definition::<PerformanceTool>()?;
    registry.register_definition::<EngagementTool>()?;

    info!("Registered {} tools", registry.len());
    Ok(registry)
}
