//! Tool handler traits.
//!
//! A handler is the business logic bound to exactly one tool descriptor.
//! It receives arguments that have already been validated against the
//! tool's schema, plus a random number generator owned by the caller, and
//! returns an ordered list of content blocks or a single error.

use rand::rngs::StdRng;

use super::content::ContentBlock;
use super::descriptor::ToolDescriptor;
use super::error::HandlerError;
use super::schema::ArgumentSchema;
use super::validator::ArgumentBundle;

/// Result type returned by tool handlers.
pub type HandlerResult = Result<Vec<ContentBlock>, HandlerError>;

/// Business logic of a tool.
///
/// Handlers must not touch shared mutable state and must not block for
/// long; they run on the blocking thread pool, one call at a time per session.
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with validated arguments.
    fn call(&self, args: &ArgumentBundle, rng: &mut StdRng) -> HandlerResult;
}

impl<F> ToolHandler for F
where
    F: Fn(&ArgumentBundle, &mut StdRng) -> HandlerResult + Send + Sync,
{
    fn call(&self, args: &ArgumentBundle, rng: &mut StdRng) -> HandlerResult {
        self(args, rng)
    }
}

/// Static definition of a tool shipped with the server.
///
/// Each tool in `definitions/` implements this trait next to
/// [`ToolHandler`], so registering it is a one-liner in `router.rs`.
pub trait ToolDefinition: ToolHandler + Default + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// The arguments this tool accepts, in validation order.
    fn schema() -> ArgumentSchema;

    /// Build the descriptor advertised for this tool.
    fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(Self::NAME, Self::DESCRIPTION, Self::schema())
    }
}
