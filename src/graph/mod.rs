//! Typed client for the Microsoft Graph directory API.
//!
//! Same conventions as [`crate::arm`]: one function per call, inline wire
//! structs, no retries.

mod principals;
mod users;

use std::time::Duration;

use anyhow::Result;

use crate::config::Config;

/// Client for the directory API
#[derive(Clone)]
pub struct GraphClient {
    pub(crate) agent: ureq::Agent,
    pub(crate) base_url: String,
    pub(crate) token: String,
}

impl GraphClient {
    /// Build a client from config and the token environment variable.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(&config.endpoints.graph, config.graph_token()?))
    }

    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .timeout_read(Duration::from_secs(60))
            .build();

        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Build a request for a `/v1.0/...` path.
    pub(crate) fn request(&self, method: &str, path: &str) -> ureq::Request {
        self.request_absolute(method, &format!("{}/v1.0{}", self.base_url, path))
    }

    /// Build a request for a full URL (`@odata.nextLink` paging).
    pub(crate) fn request_absolute(&self, method: &str, url: &str) -> ureq::Request {
        self.agent
            .request(method, url)
            .set("Authorization", &format!("Bearer {}", self.token))
    }
}
