//! MCP session - one handshake-to-shutdown conversation with a client.
//!
//! A [`Session`] owns its dispatcher and protocol state. Messages are
//! handled strictly one at a time, so responses leave in request order.

use std::sync::Arc;

use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, instrument, warn};

use super::config::Config;
use super::protocol::{
    CallToolParams, CallToolResult, ClientInfo, ErrorKind, INTERNAL_ERROR, InitializeParams,
    InitializeResult, JsonRpcResponse, ProtocolError, Request, ToolsListResult, decode_message,
};
use super::transport::TransportResult;
use crate::domains::tools::{ArgumentValidator, Dispatcher, ToolRegistry};

/// Protocol state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Only `initialize`, `ping`, `shutdown` and notifications are accepted.
    AwaitingHandshake,
    /// Handshake done; tool requests are served.
    AwaitingRequest,
    /// `shutdown` received; no further requests are served.
    Shutdown,
}

/// A single client session.
pub struct Session {
    config: Arc<Config>,
    dispatcher: Dispatcher,
    state: SessionState,
    client: Option<ClientInfo>,
}

impl Session {
    /// Create a session over a shared registry, configured from `config.tools`.
    pub fn new(config: Arc<Config>, registry: Arc<ToolRegistry>) -> Self {
        let validator = if config.tools.strict_arguments {
            ArgumentValidator::strict()
        } else {
            ArgumentValidator::default()
        };

        let mut dispatcher = Dispatcher::new(registry)
            .with_validator(validator)
            .with_timeout(config.tools.timeout());
        if let Some(seed) = config.tools.random_seed {
            dispatcher = dispatcher.with_seed(seed);
        }

        Self {
            config,
            dispatcher,
            state: SessionState::AwaitingHandshake,
            client: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_shut_down(&self) -> bool {
        self.state == SessionState::Shutdown
    }

    /// Name of the connected client, once the handshake is done.
    pub fn client_name(&self) -> Option<&str> {
        self.client.as_ref().map(|c| c.name.as_str())
    }

    /// Handle one raw inbound message.
    ///
    /// Returns `None` for notifications. Every request, including a
    /// malformed one, yields exactly one response.
    pub async fn handle_message(&mut self, bytes: &[u8]) -> Option<JsonRpcResponse> {
        let message = match decode_message(bytes) {
            Ok(message) => message,
            Err(failure) if failure.notification => {
                debug!("Dropping undecodable notification: {}", failure.error);
                return None;
            }
            Err(failure) => {
                warn!("Rejected inbound message: {}", failure.error);
                return Some(JsonRpcResponse::protocol_error(failure.id, &failure.error));
            }
        };

        debug!("Received {}", message.request.method());
        let notification = message.is_notification();
        let response = self.handle_request(message.id, message.request).await;

        if notification {
            if let Some(response) = response.filter(JsonRpcResponse::is_error) {
                debug!("Dropping error for notification: {:?}", response.error);
            }
            return None;
        }
        response
    }

    async fn handle_request(&mut self, id: Option<Value>, request: Request) -> Option<JsonRpcResponse> {
        if self.is_shut_down() {
            let err = ProtocolError::invalid_request("Session has been shut down");
            return Some(JsonRpcResponse::protocol_error(id, &err));
        }

        let response = match request {
            Request::Initialize(params) => self.initialize(id, params),
            Request::Initialized => {
                debug!("Client confirmed initialization");
                return None;
            }
            Request::Notification(method) => {
                debug!("Ignoring notification: {}", method);
                return None;
            }
            Request::Ping => JsonRpcResponse::success(id, json!({})),
            Request::Shutdown => {
                info!("Shutdown requested");
                self.state = SessionState::Shutdown;
                JsonRpcResponse::success(id, json!({}))
            }
            request if self.state == SessionState::AwaitingHandshake => {
                let err = ProtocolError::not_initialized(request.method());
                warn!("{}", err);
                JsonRpcResponse::protocol_error(id, &err)
            }
            Request::ListTools => {
                let result = ToolsListResult {
                    tools: self.dispatcher.registry().listings(),
                };
                to_response(id, &result)
            }
            Request::CallTool(params) => self.call_tool(id, params).await,
        };
        Some(response)
    }

    fn initialize(&mut self, id: Option<Value>, params: InitializeParams) -> JsonRpcResponse {
        if self.state != SessionState::AwaitingHandshake {
            let err = ProtocolError::invalid_request("Session already initialized");
            return JsonRpcResponse::protocol_error(id, &err);
        }

        if let Some(client) = &params.client_info {
            info!(
                "Client connected: {} {}",
                client.name,
                client.version.as_deref().unwrap_or("")
            );
        }
        if let Some(version) = &params.protocol_version {
            debug!("Client protocol version: {}", version);
        }

        self.client = params.client_info;
        self.state = SessionState::AwaitingRequest;

        let server = &self.config.server;
        let result = InitializeResult::new(&server.name, &server.version, server.instructions.clone());
        to_response(id, &result)
    }

    #[instrument(skip(self, id, params), fields(tool = %params.name))]
    async fn call_tool(&mut self, id: Option<Value>, params: CallToolParams) -> JsonRpcResponse {
        let arguments = params.arguments.unwrap_or(Value::Null);
        match self.dispatcher.dispatch(&params.name, &arguments).await {
            Ok(content) => to_response(id, &CallToolResult::success(content)),
            Err(e) => JsonRpcResponse::tool_error(id, &e),
        }
    }

    /// Serve newline-delimited JSON-RPC until EOF or `shutdown`.
    ///
    /// Read and write failures end the session with an error; no further
    /// responses are attempted.
    pub async fn run<R, W>(mut self, mut reader: R, mut writer: W) -> TransportResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = Vec::new();

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line).await? == 0 {
                info!("Input stream closed");
                break;
            }

            let message = line.trim_ascii();
            if message.is_empty() {
                continue;
            }

            if let Some(response) = self.handle_message(message).await {
                write_response(&mut writer, &response).await?;
            }

            if self.is_shut_down() {
                break;
            }
        }

        writer.flush().await?;
        Ok(())
    }
}

fn to_response<T: serde::Serialize>(id: Option<Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(
            id,
            INTERNAL_ERROR,
            ErrorKind::Internal,
            format!("Failed to serialize result: {e}"),
        ),
    }
}

async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &JsonRpcResponse,
) -> TransportResult<()> {
    let mut bytes = serde_json::to_vec(response)?;
    bytes.push(b'\n');
    writer.write_all(&bytes).await?;
    writer.flush().await?;
    Ok(())
}
