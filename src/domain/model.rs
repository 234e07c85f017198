use serde::{Deserialize, Serialize};
use serde_json::Value;

/// CORS headers attached to every gateway response: any origin, the two
/// supported methods, and a `Content-Type` request header.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

/// Body of a gateway POST request. Which fields matter depends on the
/// action; everything is optional at the wire level and checked per action.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadRequest {
    pub action: Option<String>,
    pub path: Option<String>,
    /// Base64-encoded file bytes.
    pub content: Option<String>,
    pub message: Option<String>,
    pub course_data: Option<Value>,
}

/// Transport-agnostic request handed to the gateway. The lambda entry
/// builds one from an API Gateway proxy event, the CLI from its arguments.
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    pub method: String,
    pub body: Option<String>,
}

impl GatewayRequest {
    pub fn new(method: impl Into<String>, body: Option<String>) -> Self {
        Self {
            method: method.into(),
            body,
        }
    }

    pub fn post(body: &Value) -> Self {
        Self::new("POST", Some(body.to_string()))
    }
}

/// Response produced by the gateway. The transport adapter serializes the
/// body and attaches [`CORS_HEADERS`].
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl GatewayResponse {
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body: Some(body),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self { status, body: None }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: Some(serde_json::json!({ "error": message.into() })),
        }
    }
}

/// A repository file as returned by the contents API. `content` is still
/// base64; the API wraps it at 60 columns, so it must be whitespace-stripped
/// before decoding.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteFile {
    pub sha: String,
    pub content: String,
}

/// Optimistic-concurrency token of a freshly written blob.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub sha: String,
}

/// Payload for a contents PUT. `sha` carries the token of the version being
/// overwritten and is omitted entirely when creating a new file.
#[derive(Debug, Clone, Serialize)]
pub struct NewContent {
    pub message: String,
    /// Base64-encoded file bytes.
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}
