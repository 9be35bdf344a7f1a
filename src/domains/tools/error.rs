//! Tool-specific error types.

use std::time::Duration;

use thiserror::Error;

use super::schema::{ArgKind, Bound};

/// Errors that can occur during tool registration and dispatch.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A tool with the same name is already registered.
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    /// The arguments did not satisfy the tool's schema.
    #[error("Invalid arguments for tool '{tool}': {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: ArgumentError,
    },

    /// The tool's handler reported a failure or panicked.
    #[error("Tool '{tool}' failed: {cause}")]
    HandlerExecution { tool: String, cause: String },

    /// The tool did not finish before the configured deadline.
    #[error("Tool '{tool}' timed out after {}ms", .after.as_millis())]
    Timeout { tool: String, after: Duration },
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "duplicate tool" error.
    pub fn duplicate_tool(name: impl Into<String>) -> Self {
        Self::DuplicateTool(name.into())
    }

    /// Wrap a validation failure for the given tool.
    pub fn invalid_arguments(tool: impl Into<String>, source: ArgumentError) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            source,
        }
    }

    /// Create a new "handler execution" error.
    pub fn handler_execution(tool: impl Into<String>, cause: impl Into<String>) -> Self {
        Self::HandlerExecution {
            tool: tool.into(),
            cause: cause.into(),
        }
    }

    /// Create a new "timeout" error.
    pub fn timeout(tool: impl Into<String>, after: Duration) -> Self {
        Self::Timeout {
            tool: tool.into(),
            after,
        }
    }

    /// Stable, machine-readable error kind reported to callers.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "unknown_tool",
            Self::DuplicateTool(_) => "duplicate_tool",
            Self::InvalidArguments { .. } => "invalid_arguments",
            Self::HandlerExecution { .. } => "handler_error",
            Self::Timeout { .. } => "timeout",
        }
    }
}

/// A single schema violation found while validating raw arguments.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgumentError {
    /// The arguments value was not a JSON object.
    #[error("arguments must be an object, got {0}")]
    NotAnObject(&'static str),

    /// A required field is absent.
    #[error("missing required argument '{0}'")]
    Missing(String),

    /// A field holds a value of the wrong kind.
    #[error("argument '{field}' must be {expected}")]
    TypeMismatch { field: String, expected: ArgKind },

    /// A field violates one of its declared bounds.
    #[error("argument '{field}' is out of range: {bound}")]
    OutOfRange { field: String, bound: Bound },

    /// A field is not declared by the schema (strict mode only).
    #[error("unknown argument '{0}'")]
    UnknownField(String),
}

impl ArgumentError {
    /// Name of the offending field, when the error concerns one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::NotAnObject(_) => None,
            Self::Missing(field) | Self::UnknownField(field) => Some(field),
            Self::TypeMismatch { field, .. } | Self::OutOfRange { field, .. } => Some(field),
        }
    }
}

/// Failure reported by a tool handler.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    /// Create a new handler error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("invalid parameters: {err}"))
    }
}
