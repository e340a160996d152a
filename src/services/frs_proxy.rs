//! FRS proxy with a host-restricted pass-through mode.
//!
//! `source=frs` builds a Facility Registry Service URL; `url=` forwards to an
//! allow-listed host. Every relayed response is wrapped in `{ok, status, body}`.

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::clients::upstream::{target_url, Upstream, UpstreamReply};
use crate::config::{is_pass_through_host, ProxyConfig, PRIMARY_HOST};
use crate::error::{ProxyError, Result};
use crate::http::response::{relay_status, ProxyReply};
use crate::logging::redact_url;
use crate::models::query::QueryParams;
use crate::models::request::RequestDescriptor;

pub const DEFAULT_PATH: &str = "v3/facilities";

const RESERVED: [&str; 3] = ["source", "path", "url"];

#[derive(Debug, Serialize)]
struct Envelope {
    ok: bool,
    status: u16,
    body: Value,
}

impl From<UpstreamReply> for Envelope {
    fn from(reply: UpstreamReply) -> Self {
        let ok = reply.is_success();
        let status = reply.status;
        let body = serde_json::from_str(&reply.body).unwrap_or(Value::String(reply.body));
        Self { ok, status, body }
    }
}

pub async fn handle(req: &RequestDescriptor, config: &ProxyConfig, upstream: &dyn Upstream) -> ProxyReply {
    if req.is_preflight() {
        return ProxyReply::preflight();
    }
    match relay(req, config, upstream).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!(error = %err, "frs proxy failed");
            ProxyReply::error(&err)
        }
    }
}

async fn relay(req: &RequestDescriptor, config: &ProxyConfig, upstream: &dyn Upstream) -> Result<ProxyReply> {
    let api_key = config.api_key()?;
    let url = resolve_target(&req.query, config, api_key)?;
    tracing::info!(url = %redact_url(&url), "frs relay");

    let reply = upstream.get(&url).await?;
    let status = relay_status(reply.status);
    let envelope = Envelope::from(reply);
    Ok(ProxyReply::json(status, serde_json::to_value(envelope)?))
}

/// Picks the upstream URL. `source=frs` wins over `url=`.
///
/// Extra top-level parameters only apply to the `source=frs` form; a
/// pass-through URL is used with its own query alone.
pub fn resolve_target(query: &QueryParams, config: &ProxyConfig, api_key: &str) -> Result<Url> {
    if query.get_single("source") == Some("frs") {
        let path = query
            .get_single("path")
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PATH)
            .trim_start_matches('/');
        let mut params = query.without(&RESERVED);
        params.set("api_key", api_key);
        return target_url(config.frs_base(), path, &params);
    }

    if let Some(raw) = query.get_joined("url").filter(|u| !u.is_empty()) {
        let mut target = Url::parse(&raw)?;
        let host = target.host_str().unwrap_or_default().to_ascii_lowercase();
        if !is_pass_through_host(&host) {
            tracing::warn!(host = %host, "pass-through host rejected");
            return Err(ProxyError::HostNotAllowed);
        }
        if host == PRIMARY_HOST && !target.query_pairs().any(|(k, _)| k == "api_key") {
            target.query_pairs_mut().append_pair("api_key", api_key);
        }
        return Ok(target);
    }

    Err(ProxyError::NoMode)
}
