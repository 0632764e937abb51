//! Typed client for the Azure Resource Manager management API.
//!
//! One operation function per REST call, with the request/response wire
//! structs declared inline where they are used. No retries: a failed call
//! surfaces as an [`ApiError`] and the command decides whether to abort or
//! warn and continue.

mod containers;
mod error;
mod metrics;
mod network;
mod poller;
mod rbac;
mod resource_groups;
mod resources;
mod storage;
mod vms;

pub use error::ApiError;
pub use poller::PendingDeletion;
pub use vms::ImageReference;

use std::time::Duration;

use anyhow::Result;

use crate::config::Config;

fn encode_url_path_segment(segment: &str) -> String {
    // RFC3986 unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
    let mut out = String::with_capacity(segment.len());
    for &b in segment.as_bytes() {
        let is_unreserved =
            matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~');
        if is_unreserved {
            out.push(b as char);
        } else {
            out.push('%');
            out.push_str(&format!("{:02X}", b));
        }
    }
    out
}

/// Client for the management API, bound to one subscription
#[derive(Clone)]
pub struct ArmClient {
    pub(crate) agent: ureq::Agent,
    pub(crate) base_url: String,
    pub(crate) subscription_id: String,
    pub(crate) token: String,
}

impl ArmClient {
    /// Build a client from config, CLI subscription override, and the token
    /// environment variable.
    pub fn from_config(config: &Config, subscription_override: Option<&str>) -> Result<Self> {
        Ok(Self::new(
            &config.endpoints.management,
            config.subscription_id(subscription_override)?,
            config.arm_token()?,
        ))
    }

    pub fn new(
        base_url: impl Into<String>,
        subscription_id: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .timeout_read(Duration::from_secs(120))
            .build();

        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            subscription_id: subscription_id.into(),
            token: token.into(),
        }
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    /// The scope string for subscription-level RBAC operations.
    pub fn subscription_scope(&self) -> String {
        format!("/subscriptions/{}", self.subscription_id)
    }

    /// Build a request for a path under this subscription.
    pub(crate) fn request_sub(&self, method: &str, suffix: &str) -> ureq::Request {
        let path = format!("/subscriptions/{}{}", self.subscription_id, suffix);
        self.request(method, &path)
    }

    /// Build a request for an ARM path (`/subscriptions/...`, `/providers/...`).
    pub(crate) fn request(&self, method: &str, path: &str) -> ureq::Request {
        self.request_absolute(method, &format!("{}{}", self.base_url, path))
    }

    /// Build a request for a full URL (nextLink paging, Location polling).
    pub(crate) fn request_absolute(&self, method: &str, url: &str) -> ureq::Request {
        self.agent
            .request(method, url)
            .set("Authorization", &format!("Bearer {}", self.token))
    }
}

/// Issue a bodyless request, mapping status errors to [`ApiError`].
pub(crate) fn send(request: ureq::Request) -> Result<ureq::Response, ApiError> {
    request.call().map_err(ApiError::from)
}

/// Issue a request with a JSON body, mapping status errors to [`ApiError`].
pub(crate) fn send_json(
    request: ureq::Request,
    body: impl serde::Serialize,
) -> Result<ureq::Response, ApiError> {
    request.send_json(body).map_err(ApiError::from)
}
