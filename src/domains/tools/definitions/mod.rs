//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod marketing;

pub use marketing::{
    CalendarParams, CalendarTool, ContentIdeasParams, ContentIdeasTool, EngagementParams,
    EngagementTool, HashtagsParams, HashtagsTool, PerformanceParams, PerformanceTool,
};
