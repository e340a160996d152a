use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use url::Url;

use crate::error::{ProxyError, Result};
use crate::logging::redact_url;
use crate::models::query::QueryParams;

/// What the proxy keeps of an upstream response: status, declared type, text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type.contains("application/json")
    }
}

/// `base` extended by the `/`-separated `path` with `params` as the query.
///
/// Each path segment is percent-encoded, so a `?` or `#` inside `path` can
/// never move the query into a fragment.
pub fn target_url(base: &str, path: &str, params: &QueryParams) -> Result<Url> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| ProxyError::Other(anyhow::anyhow!("upstream base {base} cannot take a path")))?
        .pop_if_empty()
        .extend(path.split('/'));
    url.set_query(Some(&params.to_query_string()));
    Ok(url)
}

/// The single outbound call a handler makes.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn get(&self, url: &Url) -> Result<UpstreamReply>;
}

pub struct HttpUpstream {
    client: Client,
}

impl HttpUpstream {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("epa-proxy/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn get(&self, url: &Url) -> Result<UpstreamReply> {
        tracing::debug!(url = %redact_url(url), "upstream request");
        let resp = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = resp.text().await?;
        tracing::debug!(status, content_type = %content_type, len = body.len(), "upstream response");

        Ok(UpstreamReply {
            status,
            content_type,
            body,
        })
    }
}
