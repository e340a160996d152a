#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use epa_proxy::clients::upstream::{Upstream, UpstreamReply};
use epa_proxy::models::request::RequestDescriptor;
use epa_proxy::Result;
use url::Url;

pub const KEY: &str = "test-key";

pub fn get(raw_query: &str) -> RequestDescriptor {
    RequestDescriptor::new("GET", Some(raw_query))
}

/// Returns one canned reply and records every URL it was asked for.
pub struct RecordingUpstream {
    reply: UpstreamReply,
    pub seen: Mutex<Vec<Url>>,
}

impl RecordingUpstream {
    pub fn new(status: u16, content_type: &str, body: &str) -> Self {
        Self {
            reply: UpstreamReply {
                status,
                content_type: content_type.to_string(),
                body: body.to_string(),
            },
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn json(body: &str) -> Self {
        Self::new(200, "application/json", body)
    }

    pub fn calls(&self) -> Vec<Url> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Upstream for RecordingUpstream {
    async fn get(&self, url: &Url) -> Result<UpstreamReply> {
        self.seen.lock().unwrap().push(url.clone());
        Ok(self.reply.clone())
    }
}
