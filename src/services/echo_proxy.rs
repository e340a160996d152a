//! ECHO proxy: forwards a query to one ECHO REST service with the server key attached.
//!
//! Successful JSON is relayed as-is; upstream failures come back wrapped in
//! `{ok:false, status, body}`. Callers depend on that split.

use serde_json::{json, Value};
use vercel_runtime::StatusCode;

use crate::clients::upstream::{target_url, Upstream};
use crate::config::ProxyConfig;
use crate::error::Result;
use crate::http::response::{relay_status, ProxyReply};
use crate::logging::redact_url;
use crate::models::query::QueryParams;
use crate::models::request::RequestDescriptor;

pub const DEFAULT_ENDPOINT: &str = "rest_services.get_facility_info";
pub const ALIVE_MESSAGE: &str = "echo proxy alive";

/// Parameters consumed by the proxy itself and never forwarded.
const RESERVED: [&str; 2] = ["endpoint", "ping"];

pub async fn handle(req: &RequestDescriptor, config: &ProxyConfig, upstream: &dyn Upstream) -> ProxyReply {
    if req.is_preflight() {
        return ProxyReply::preflight();
    }
    match relay(req, config, upstream).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!(error = %err, "echo proxy failed");
            ProxyReply::error(&err)
        }
    }
}

async fn relay(req: &RequestDescriptor, config: &ProxyConfig, upstream: &dyn Upstream) -> Result<ProxyReply> {
    // Presence is enough: `?ping=` with no value is a liveness check too.
    if req.query.contains("ping") {
        return Ok(ProxyReply::json(
            StatusCode::OK,
            json!({"ok": true, "message": ALIVE_MESSAGE}),
        ));
    }

    let endpoint = endpoint(&req.query);
    let mut params = req.query.without(&RESERVED);

    let api_key = config.api_key()?;
    params.append_if_absent("api_key", api_key);
    params.append_if_absent("output", "JSON");

    let url = target_url(config.echo_base(), &endpoint, &params)?;
    tracing::info!(url = %redact_url(&url), "echo relay");

    let reply = upstream.get(&url).await?;
    let status = relay_status(reply.status);

    if !reply.is_success() {
        tracing::warn!(status = reply.status, "echo upstream returned failure");
        return Ok(ProxyReply::json(
            status,
            json!({"ok": false, "status": reply.status, "body": reply.body}),
        ));
    }

    if reply.is_json() {
        let value: Value = serde_json::from_str(&reply.body)?;
        Ok(ProxyReply::json(status, value))
    } else {
        Ok(ProxyReply::text(status, &reply.content_type, reply.body))
    }
}

fn endpoint(query: &QueryParams) -> String {
    match query.get_joined("endpoint") {
        Some(e) if !e.is_empty() => e,
        _ => DEFAULT_ENDPOINT.to_string(),
    }
}
