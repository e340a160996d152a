use serde_json::{json, Value};
use vercel_runtime::{Body, Response, StatusCode};

use crate::error::ProxyError;

const TEXT_FALLBACK: &str = "text/plain; charset=utf-8";

#[derive(Debug, Clone, PartialEq)]
pub enum ReplyBody {
    Empty,
    Json(Value),
    Text { content_type: String, text: String },
}

/// Handler output before it is turned into a platform response.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyReply {
    pub status: StatusCode,
    pub body: ReplyBody,
}

impl ProxyReply {
    pub fn preflight() -> Self {
        Self { status: StatusCode::OK, body: ReplyBody::Empty }
    }

    pub fn json(status: StatusCode, value: Value) -> Self {
        Self { status, body: ReplyBody::Json(value) }
    }

    pub fn text(status: StatusCode, content_type: &str, text: String) -> Self {
        let content_type = if content_type.is_empty() { TEXT_FALLBACK } else { content_type };
        Self {
            status,
            body: ReplyBody::Text { content_type: content_type.to_string(), text },
        }
    }

    pub fn error(err: &ProxyError) -> Self {
        let (status, value) = error_response(err);
        Self::json(status, value)
    }

    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            ReplyBody::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_response(self) -> anyhow::Result<Response<Body>> {
        match self.body {
            ReplyBody::Empty => Ok(Response::builder().status(self.status).body(Body::Empty)?),
            ReplyBody::Json(value) => json_response(self.status, &value),
            ReplyBody::Text { content_type, text } => Ok(Response::builder()
                .status(self.status)
                .header("Content-Type", content_type)
                .body(text.into())?),
        }
    }
}

pub fn error_response(err: &ProxyError) -> (StatusCode, Value) {
    let status = match err {
        ProxyError::NoMode | ProxyError::HostNotAllowed => StatusCode::BAD_REQUEST,
        ProxyError::MissingApiKey
        | ProxyError::InvalidUrl(_)
        | ProxyError::Upstream(_)
        | ProxyError::InvalidJson(_)
        | ProxyError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, json!({"ok": false, "error": err.to_string()}))
}

/// Upstream status as a response status; codes `http` rejects become 502.
pub fn relay_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
}

pub fn json_response<T: serde::Serialize>(status: StatusCode, value: &T) -> anyhow::Result<Response<Body>> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(serde_json::to_string(value)?.into())?)
}
