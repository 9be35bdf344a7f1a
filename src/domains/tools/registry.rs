//! Tool Registry - ordered registration and lookup of all tools.
//!
//! The registry is the dispatch table: it binds each descriptor to its
//! handler. It is filled once at startup and shared read-only (behind an
//! `Arc`) by every session afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::descriptor::{ToolDescriptor, ToolListing};
use super::error::ToolError;
use super::handlers::{ToolDefinition, ToolHandler};

/// A descriptor together with the handler it is bound to.
#[derive(Clone)]
pub struct RegisteredTool {
    descriptor: ToolDescriptor,
    handler: Arc<dyn ToolHandler>,
}

impl RegisteredTool {
    pub fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    pub fn handler(&self) -> Arc<dyn ToolHandler> {
        Arc::clone(&self.handler)
    }
}

/// Tool registry - manages all available tools in registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its descriptor's name.
    pub fn register(
        &mut self,
        descriptor: ToolDescriptor,
        handler: Arc<dyn ToolHandler>,
    ) -> Result<(), ToolError> {
        if self.index.contains_key(descriptor.name()) {
            return Err(ToolError::duplicate_tool(descriptor.name()));
        }

        debug!("Registering tool: {}", descriptor.name());
        self.index
            .insert(descriptor.name().to_string(), self.tools.len());
        self.tools.push(RegisteredTool {
            descriptor,
            handler,
        });
        Ok(())
    }

    /// Register a built-in tool definition.
    pub fn register_definition<T: ToolDefinition>(&mut self) -> Result<(), ToolError> {
        self.register(T::descriptor(), Arc::new(T::default()))
    }

    /// All descriptors, in registration order.
    pub fn list(&self) -> Vec<&ToolDescriptor> {
        self.tools.iter().map(|t| &t.descriptor).collect()
    }

    /// Descriptors rendered for a `tools/list` response.
    pub fn listings(&self) -> Vec<ToolListing> {
        self.tools.iter().map(|t| t.descriptor.to_listing()).collect()
    }

    /// Look up a tool's descriptor by name.
    pub fn lookup(&self, name: &str) -> Result<&ToolDescriptor, ToolError> {
        self.get(name).map(RegisteredTool::descriptor)
    }

    /// Look up a tool (descriptor and handler) by name.
    pub fn get(&self, name: &str) -> Result<&RegisteredTool, ToolError> {
        self.index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| ToolError::unknown_tool(name))
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.descriptor.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::content::ContentBlock;
    use crate::domains::tools::handlers::HandlerResult;
    use crate::domains::tools::schema::{ArgumentSchema, FieldSpec};
    use crate::domains::tools::validator::ArgumentBundle;
    use rand::rngs::StdRng;

    fn echo(args: &ArgumentBundle, _rng: &mut StdRng) -> HandlerResult {
        Ok(vec![ContentBlock::text(args.str("text").unwrap_or_default())])
    }

    fn descriptor(name: &str) -> ToolDescriptor {
        ToolDescriptor::new(
            name,
            format!("{name} tool"),
            ArgumentSchema::new().field(FieldSpec::string("text").required()),
        )
    }

    fn test_registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        for name in ["echo", "shout", "whisper"] {
            registry.register(descriptor(name), Arc::new(echo)).unwrap();
        }
        registry
    }

    #[test]
    fn test_list_preserves_registration_order() {
        let registry = test_registry();
        assert_eq!(registry.tool_names(), vec!["echo", "shout", "whisper"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_lookup_round_trip() {
        let registry = test_registry();
        for descriptor in registry.list() {
            assert_eq!(registry.lookup(descriptor.name()).unwrap(), descriptor);
        }
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = test_registry();
        let err = registry
            .register(descriptor("shout"), Arc::new(echo))
            .unwrap_err();
        assert!(matches!(err, ToolError::DuplicateTool(ref name) if name == "shout"));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_lookup_unknown() {
        let registry = test_registry();
        let err = registry.lookup("ghost").unwrap_err();
        assert_eq!(err.kind(), "unknown_tool");
    }

    #[test]
    fn test_listings() {
        let registry = test_registry();
        let listings = registry.listings();
        assert_eq!(listings.len(), 3);
        assert_eq!(listings[1].name, "shout");
        assert_eq!(listings[1].input_schema["required"][0], "text");
    }
}
