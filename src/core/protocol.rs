//! MCP JSON-RPC protocol types.
//!
//! Wire format for the handshake, `tools/list`, `tools/call`, `ping` and
//! `shutdown`, plus the decoding of raw inbound messages into typed
//! [`Request`]s. Every error response carries a machine-readable kind in
//! `error.data.kind`.

use rmcp::model::{ProtocolVersion, ServerCapabilities};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domains::tools::{ContentBlock, ToolError, ToolListing};

// ============================================================================
// JSON-RPC Error Codes
// ============================================================================

/// Invalid JSON was received.
pub const PARSE_ERROR: i32 = -32_700;

/// The JSON sent is not a valid request object.
pub const INVALID_REQUEST: i32 = -32_600;

/// The method does not exist.
pub const METHOD_NOT_FOUND: i32 = -32_601;

/// Invalid method parameters (also used for unknown tools and bad arguments).
pub const INVALID_PARAMS: i32 = -32_602;

/// Internal error (handler failures and timeouts).
pub const INTERNAL_ERROR: i32 = -32_603;

// ============================================================================
// JSON-RPC Messages
// ============================================================================

/// Incoming JSON-RPC message envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    /// Request identifier (`None` for notifications).
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// Outgoing JSON-RPC response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    /// The error kind carried in `data.kind`, if any.
    pub fn kind(&self) -> Option<&str> {
        self.data.as_ref()?.get("kind")?.as_str()
    }
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.unwrap_or(Value::Null),
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response with a kind in `data`.
    pub fn error(
        id: Option<Value>,
        code: i32,
        kind: ErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.unwrap_or(Value::Null),
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: Some(json!({ "kind": kind })),
            }),
        }
    }

    /// Error response for a failed tool call.
    pub fn tool_error(id: Option<Value>, err: &ToolError) -> Self {
        let (code, kind) = match err {
            ToolError::UnknownTool(_) => (INVALID_PARAMS, ErrorKind::UnknownTool),
            ToolError::InvalidArguments { .. } => (INVALID_PARAMS, ErrorKind::InvalidArguments),
            ToolError::HandlerExecution { .. } => (INTERNAL_ERROR, ErrorKind::HandlerError),
            ToolError::Timeout { .. } => (INTERNAL_ERROR, ErrorKind::Timeout),
            ToolError::DuplicateTool(_) => (INTERNAL_ERROR, ErrorKind::Internal),
        };
        let mut response = Self::error(id, code, kind, err.to_string());

        // Name the offending argument so clients can point at it.
        if let ToolError::InvalidArguments { source, .. } = err {
            if let (Some(field), Some(error)) = (source.field(), response.error.as_mut()) {
                error.data = Some(json!({ "kind": kind, "field": field }));
            }
        }
        response
    }

    /// Error response for a malformed or out-of-sequence message.
    pub fn protocol_error(id: Option<Value>, err: &ProtocolError) -> Self {
        Self::error(id, err.code, ErrorKind::ProtocolError, err.message.clone())
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Error kinds reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnknownTool,
    InvalidArguments,
    HandlerError,
    Timeout,
    ProtocolError,
    Internal,
}

/// A malformed, unsupported or out-of-sequence inbound message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ProtocolError {
    pub code: i32,
    pub message: String,
}

impl ProtocolError {
    fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn parse(detail: impl std::fmt::Display) -> Self {
        Self::new(PARSE_ERROR, format!("Parse error: {detail}"))
    }

    pub fn invalid_request(detail: impl Into<String>) -> Self {
        Self::new(INVALID_REQUEST, detail)
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, format!("Method not found: {method}"))
    }

    pub fn invalid_params(detail: impl std::fmt::Display) -> Self {
        Self::new(INVALID_PARAMS, format!("Invalid params: {detail}"))
    }

    pub fn not_initialized(method: &str) -> Self {
        Self::new(
            INVALID_REQUEST,
            format!("Session not initialized: '{method}' received before 'initialize'"),
        )
    }
}

// ============================================================================
// Typed Requests
// ============================================================================

/// A decoded inbound message.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: Option<Value>,
    pub request: Request,
}

impl Message {
    /// Notifications carry no id and receive no response.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// The requests this server understands.
#[derive(Debug, Clone)]
pub enum Request {
    Initialize(InitializeParams),
    Initialized,
    ListTools,
    CallTool(CallToolParams),
    Ping,
    Shutdown,
    /// Any other notification; ignored.
    Notification(String),
}

impl Request {
    /// Method name, for logging.
    pub fn method(&self) -> &str {
        match self {
            Self::Initialize(_) => "initialize",
            Self::Initialized => "notifications/initialized",
            Self::ListTools => "tools/list",
            Self::CallTool(_) => "tools/call",
            Self::Ping => "ping",
            Self::Shutdown => "shutdown",
            Self::Notification(method) => method,
        }
    }
}

/// A message that could not be decoded into a [`Request`].
#[derive(Debug, Clone)]
pub struct DecodeFailure {
    /// Request id, when it could be recovered.
    pub id: Option<Value>,
    /// The envelope was valid JSON-RPC 2.0 but carried no id.
    pub notification: bool,
    pub error: ProtocolError,
}

impl DecodeFailure {
    fn new(id: Option<Value>, error: ProtocolError) -> Self {
        Self {
            id,
            notification: false,
            error,
        }
    }
}

/// Decode one raw message.
///
/// Unparsable JSON and invalid envelopes are never treated as
/// notifications, so they can always be answered.
pub fn decode_message(bytes: &[u8]) -> Result<Message, DecodeFailure> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| DecodeFailure::new(None, ProtocolError::parse(e)))?;
    let id = value.get("id").filter(|v| !v.is_null()).cloned();

    let envelope: JsonRpcRequest = serde_json::from_value(value).map_err(|e| {
        DecodeFailure::new(
            id.clone(),
            ProtocolError::invalid_request(format!("Invalid request: {e}")),
        )
    })?;
    if envelope.jsonrpc != "2.0" {
        return Err(DecodeFailure::new(
            id,
            ProtocolError::invalid_request(format!(
                "Unsupported JSON-RPC version: {}",
                envelope.jsonrpc
            )),
        ));
    }

    let notification = envelope.id.is_none();
    let request =
        decode_request(&envelope.method, envelope.params, notification).map_err(|error| {
            DecodeFailure {
                id: id.clone(),
                notification,
                error,
            }
        })?;
    Ok(Message { id, request })
}

fn decode_request(
    method: &str,
    params: Option<Value>,
    notification: bool,
) -> Result<Request, ProtocolError> {
    let request = match method {
        "initialize" => Request::Initialize(match params {
            Some(p) => serde_json::from_value(p).map_err(ProtocolError::invalid_params)?,
            None => InitializeParams::default(),
        }),
        "notifications/initialized" if notification => Request::Initialized,
        "tools/list" => Request::ListTools,
        "tools/call" => {
            let params = params.ok_or_else(|| ProtocolError::invalid_params("missing params"))?;
            Request::CallTool(serde_json::from_value(params).map_err(ProtocolError::invalid_params)?)
        }
        "ping" => Request::Ping,
        "shutdown" => Request::Shutdown,
        other if notification => Request::Notification(other.to_string()),
        other => return Err(ProtocolError::method_not_found(other)),
    };
    Ok(request)
}

// ============================================================================
// MCP Payloads
// ============================================================================

/// Parameters for the `initialize` request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    #[serde(default)]
    pub protocol_version: Option<String>,
    #[serde(default)]
    pub capabilities: Value,
    #[serde(default)]
    pub client_info: Option<ClientInfo>,
}

/// Client identification sent during initialization.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// Result of the `initialize` handshake.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: ProtocolVersion,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerIdentity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl InitializeResult {
    /// Handshake answer with the fixed capability set of this server: tools only.
    pub fn new(name: &str, version: &str, instructions: Option<String>) -> Self {
        Self {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: ServerIdentity {
                name: name.to_string(),
                version: version.to_string(),
            },
            instructions,
        }
    }
}

/// Server identification.
#[derive(Debug, Clone, Serialize)]
pub struct ServerIdentity {
    pub name: String,
    pub version: String,
}

/// Parameters for a `tools/call` request.
#[derive(Debug, Clone, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Result of a `tools/list` call.
#[derive(Debug, Clone, Serialize)]
pub struct ToolsListResult {
    pub tools: Vec<ToolListing>,
}

/// Result of a successful `tools/call`.
#[derive(Debug, Clone, Serialize)]
pub struct CallToolResult {
    pub content: Vec<ContentBlock>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl CallToolResult {
    pub fn success(content: Vec<ContentBlock>) -> Self {
        Self {
            content,
            is_error: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::ArgumentError;

    #[test]
    fn test_decode_call_tool() {
        let raw = br#"{"jsonrpc":"2.0","id":7,"method":"tools/call","params":{"name":"echo","arguments":{"text":"hi"}}}"#;
        let message = decode_message(raw).unwrap();
        assert_eq!(message.id, Some(json!(7)));
        match message.request {
            Request::CallTool(params) => {
                assert_eq!(params.name, "echo");
                assert_eq!(params.arguments, Some(json!({ "text": "hi" })));
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn test_decode_notification() {
        let message =
            decode_message(br#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).unwrap();
        assert!(message.is_notification());
        assert!(matches!(message.request, Request::Initialized));

        let message =
            decode_message(br#"{"jsonrpc":"2.0","method":"notifications/cancelled"}"#).unwrap();
        assert!(matches!(message.request, Request::Notification(ref m) if m == "notifications/cancelled"));
    }

    #[test]
    fn test_decode_parse_error() {
        let failure = decode_message(b"{not json").unwrap_err();
        assert!(failure.id.is_none());
        assert!(!failure.notification);
        assert_eq!(failure.error.code, PARSE_ERROR);

        let failure = decode_message(&[0xff, 0xfe, b'{']).unwrap_err();
        assert_eq!(failure.error.code, PARSE_ERROR);
    }

    #[test]
    fn test_decode_keeps_id_on_invalid_request() {
        let failure = decode_message(br#"{"jsonrpc":"1.0","id":3,"method":"ping"}"#).unwrap_err();
        assert_eq!(failure.id, Some(json!(3)));
        assert_eq!(failure.error.code, INVALID_REQUEST);

        let failure =
            decode_message(br#"{"jsonrpc":"2.0","id":"a","method":"tools/call"}"#).unwrap_err();
        assert_eq!(failure.id, Some(json!("a")));
        assert!(!failure.notification);
        assert_eq!(failure.error.code, INVALID_PARAMS);

        let failure =
            decode_message(br#"{"jsonrpc":"2.0","id":4,"method":"resources/list"}"#).unwrap_err();
        assert_eq!(failure.error.code, METHOD_NOT_FOUND);
    }

    #[test]
    fn test_decode_failure_flags_notifications() {
        let failure = decode_message(br#"{"jsonrpc":"2.0","method":"tools/call"}"#).unwrap_err();
        assert!(failure.notification);
        assert_eq!(failure.error.code, INVALID_PARAMS);

        // An invalid envelope is answered even without an id.
        let failure = decode_message(br#"{"jsonrpc":"1.0","method":"ping"}"#).unwrap_err();
        assert!(!failure.notification);
    }

    #[test]
    fn test_initialized_with_id_is_not_a_notification() {
        let failure =
            decode_message(br#"{"jsonrpc":"2.0","id":5,"method":"notifications/initialized"}"#)
                .unwrap_err();
        assert_eq!(failure.id, Some(json!(5)));
        assert_eq!(failure.error.code, METHOD_NOT_FOUND);
    }

    #[test]
    fn test_tool_error_response() {
        let response = JsonRpcResponse::tool_error(Some(json!(1)), &ToolError::unknown_tool("ghost"));
        let error = response.error.unwrap();
        assert_eq!(error.code, INVALID_PARAMS);
        assert_eq!(error.kind(), Some("unknown_tool"));
        assert!(error.message.contains("ghost"));
        assert!(error.data.unwrap().get("field").is_none());
    }

    #[test]
    fn test_invalid_arguments_response_names_field() {
        let err = ToolError::invalid_arguments("echo", ArgumentError::Missing("text".into()));
        let error = JsonRpcResponse::tool_error(Some(json!(2)), &err).error.unwrap();
        assert_eq!(error.code, INVALID_PARAMS);
        assert_eq!(error.data, Some(json!({ "kind": "invalid_arguments", "field": "text" })));
    }

    #[test]
    fn test_response_serialization() {
        let response = JsonRpcResponse::success(Some(json!(1)), json!({ "ok": true }));
        let text = serde_json::to_string(&response).unwrap();
        assert!(text.contains("\"result\""));
        assert!(!text.contains("\"error\""));

        let response = JsonRpcResponse::protocol_error(None, &ProtocolError::parse("eof"));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["id"], Value::Null);
        assert_eq!(value["error"]["code"], PARSE_ERROR);
        assert_eq!(value["error"]["data"]["kind"], "protocol_error");
    }

    #[test]
    fn test_initialize_result_shape() {
        let result = InitializeResult::new("mcp-marketing-agency", "1.0.0", None);
        let value = serde_json::to_value(&result).unwrap();
        assert!(value["protocolVersion"].is_string());
        assert!(value["capabilities"]["tools"].is_object());
        assert_eq!(value["serverInfo"]["name"], "mcp-marketing-agency");
        assert_eq!(value["serverInfo"]["version"], "1.0.0");
        assert!(value.get("instructions").is_none());
    }

    #[test]
    fn test_call_tool_result_shape() {
        let value =
            serde_json::to_value(CallToolResult::success(vec![ContentBlock::text("hi")])).unwrap();
        assert_eq!(value, json!({ "content": [{ "type": "text", "text": "hi" }], "isError": false }));
    }
}
