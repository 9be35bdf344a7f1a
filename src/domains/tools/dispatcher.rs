//! Tool dispatcher - validates and routes calls to their handlers.
//!
//! Each session owns one dispatcher. Handlers run on tokio's blocking pool
//! so that a panic is contained and an optional deadline can be enforced;
//! the caller still awaits every call before issuing the next one.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde_json::Value;
use tokio::task::JoinError;
use tracing::{debug, info, instrument, warn};

use super::content::ContentBlock;
use super::error::ToolError;
use super::registry::ToolRegistry;
use super::validator::ArgumentValidator;

/// Routes tool calls through validation to the bound handler.
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    validator: ArgumentValidator,
    timeout: Option<Duration>,
    rng: StdRng,
}

impl Dispatcher {
    /// Create a dispatcher with an entropy-seeded generator and no deadline.
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            validator: ArgumentValidator::default(),
            timeout: None,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_validator(mut self, validator: ArgumentValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Deadline applied to each handler invocation.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Make handler randomness reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Validate `arguments` for the named tool and invoke its handler once.
    #[instrument(skip(self, arguments))]
    pub async fn dispatch(
        &mut self,
        name: &str,
        arguments: &Value,
    ) -> Result<Vec<ContentBlock>, ToolError> {
        let tool = self.registry.get(name).inspect_err(|_| {
            warn!("Unknown tool requested: {}", name);
        })?;

        let bundle = self
            .validator
            .validate(tool.descriptor(), arguments)
            .map_err(|e| {
                warn!("Invalid arguments for {}: {}", name, e);
                ToolError::invalid_arguments(name, e)
            })?;

        let handler = tool.handler();
        let mut rng = StdRng::seed_from_u64(self.rng.next_u64());

        info!("Calling tool: {}", name);
        let task = tokio::task::spawn_blocking(move || handler.call(&bundle, &mut rng));

        let joined = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, task).await {
                Ok(joined) => joined,
                Err(_) => {
                    // The detached task keeps running; its result is dropped.
                    warn!("Tool {} exceeded its {:?} deadline", name, limit);
                    return Err(ToolError::timeout(name, limit));
                }
            },
            None => task.await,
        };

        match joined {
            Ok(Ok(content)) => {
                debug!("Tool {} returned {} block(s)", name, content.len());
                Ok(content)
            }
            Ok(Err(e)) => {
                warn!("Tool {} failed: {}", name, e);
                Err(ToolError::handler_execution(name, e.message()))
            }
            Err(e) => {
                let cause = join_failure(e);
                warn!("Tool {} aborted: {}", name, cause);
                Err(ToolError::handler_execution(name, cause))
            }
        }
    }
}

fn join_failure(err: JoinError) -> String {
    if !err.is_panic() {
        return "handler task was cancelled".to_string();
    }
    let payload: Box<dyn Any + Send> = err.into_panic();
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("handler panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("handler panicked: {msg}")
    } else {
        "handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::descriptor::ToolDescriptor;
    use crate::domains::tools::error::{ArgumentError, HandlerError};
    use crate::domains::tools::handlers::{HandlerResult, ToolHandler};
    use crate::domains::tools::schema::{ArgumentSchema, FieldSpec};
    use crate::domains::tools::validator::ArgumentBundle;
    use rand::Rng;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn echo(args: &ArgumentBundle, _rng: &mut StdRng) -> HandlerResult {
        Ok(vec![ContentBlock::text(args.str("text").unwrap_or_default())])
    }

    #[derive(Default)]
    struct CountingEcho {
        calls: AtomicUsize,
    }

    impl ToolHandler for CountingEcho {
        fn call(&self, args: &ArgumentBundle, rng: &mut StdRng) -> HandlerResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            echo(args, rng)
        }
    }

    fn failing(_args: &ArgumentBundle, _rng: &mut StdRng) -> HandlerResult {
        Err(HandlerError::new("boom"))
    }

    fn panicking(_args: &ArgumentBundle, _rng: &mut StdRng) -> HandlerResult {
        panic!("kaboom")
    }

    fn slow(_args: &ArgumentBundle, _rng: &mut StdRng) -> HandlerResult {
        std::thread::sleep(Duration::from_millis(300));
        Ok(vec![ContentBlock::text("late")])
    }

    fn dice(_args: &ArgumentBundle, rng: &mut StdRng) -> HandlerResult {
        let rolls: Vec<String> = (0..5).map(|_| rng.gen_range(1..=6).to_string()).collect();
        Ok(vec![ContentBlock::text(rolls.join(","))])
    }

    fn test_registry() -> Arc<ToolRegistry> {
        let text_schema = || ArgumentSchema::new().field(FieldSpec::string("text").required());
        let mut registry = ToolRegistry::new();
        registry
            .register(ToolDescriptor::new("echo", "Echo", text_schema()), Arc::new(echo))
            .unwrap();
        registry
            .register(ToolDescriptor::new("failing", "Fails", ArgumentSchema::new()), Arc::new(failing))
            .unwrap();
        registry
            .register(ToolDescriptor::new("panicking", "Panics", ArgumentSchema::new()), Arc::new(panicking))
            .unwrap();
        registry
            .register(ToolDescriptor::new("slow", "Sleeps", ArgumentSchema::new()), Arc::new(slow))
            .unwrap();
        registry
            .register(ToolDescriptor::new("dice", "Rolls dice", ArgumentSchema::new()), Arc::new(dice))
            .unwrap();
        Arc::new(registry)
    }

    #[tokio::test]
    async fn test_dispatch_echo() {
        let mut dispatcher = Dispatcher::new(test_registry());
        let content = dispatcher
            .dispatch("echo", &json!({ "text": "hi" }))
            .await
            .unwrap();
        assert_eq!(content, vec![ContentBlock::text("hi")]);
    }

    #[tokio::test]
    async fn test_handler_invoked_exactly_once() {
        let counter = Arc::new(CountingEcho::default());
        let mut registry = ToolRegistry::new();
        registry
            .register(
                ToolDescriptor::new(
                    "echo",
                    "Echo",
                    ArgumentSchema::new().field(FieldSpec::string("text").required()),
                ),
                counter.clone(),
            )
            .unwrap();
        let mut dispatcher = Dispatcher::new(Arc::new(registry));

        dispatcher
            .dispatch("echo", &json!({ "text": "once" }))
            .await
            .unwrap();
        assert_eq!(counter.calls.load(Ordering::SeqCst), 1);

        // Rejected calls never reach the handler.
        dispatcher.dispatch("echo", &json!({})).await.unwrap_err();
        assert_eq!(counter.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let mut dispatcher = Dispatcher::new(test_registry());
        let err = dispatcher
            .dispatch("unknown_tool_name", &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(ref name) if name == "unknown_tool_name"));
    }

    #[tokio::test]
    async fn test_dispatch_invalid_arguments() {
        let mut dispatcher = Dispatcher::new(test_registry());
        let err = dispatcher.dispatch("echo", &json!({})).await.unwrap_err();

        match err {
            ToolError::InvalidArguments { tool, source } => {
                assert_eq!(tool, "echo");
                assert_eq!(source, ArgumentError::Missing("text".into()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handler_error_is_wrapped() {
        let mut dispatcher = Dispatcher::new(test_registry());
        let err = dispatcher.dispatch("failing", &json!({})).await.unwrap_err();
        assert_eq!(err.kind(), "handler_error");
        assert!(err.to_string().contains("failing"));
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn test_handler_panic_is_contained() {
        let mut dispatcher = Dispatcher::new(test_registry());
        let err = dispatcher.dispatch("panicking", &json!({})).await.unwrap_err();
        assert_eq!(err.kind(), "handler_error");
        assert!(err.to_string().contains("kaboom"));

        // The dispatcher is still usable afterwards.
        let content = dispatcher
            .dispatch("echo", &json!({ "text": "still here" }))
            .await
            .unwrap();
        assert_eq!(content[0].as_text(), Some("still here"));
    }

    #[tokio::test]
    async fn test_timeout() {
        let mut dispatcher =
            Dispatcher::new(test_registry()).with_timeout(Some(Duration::from_millis(20)));
        let err = dispatcher.dispatch("slow", &json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::Timeout { ref tool, .. } if tool == "slow"));
    }

    #[tokio::test]
    async fn test_seeded_dispatch_is_reproducible() {
        let registry = test_registry();
        let mut first = Dispatcher::new(registry.clone()).with_seed(42);
        let mut second = Dispatcher::new(registry).with_seed(42);

        for _ in 0..3 {
            let a = first.dispatch("dice", &Value::Null).await.unwrap();
            let b = second.dispatch("dice", &Value::Null).await.unwrap();
            assert_eq!(a, b);
        }
    }
}
