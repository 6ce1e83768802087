//! HTTP transport for tag writes and read-back.

#![allow(missing_docs)]

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use tagset_core::{SetRequest, TagPath, TAG_SET_PATH};
use tracing::{debug, warn};

use crate::error::ClientError;

/// Result of a write the server answered with a success status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    Accepted,
    /// The server answered `fail` (unknown tag, size mismatch, ...).
    Rejected,
}

impl SetOutcome {
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        if body.trim().eq_ignore_ascii_case("fail") {
            Self::Rejected
        } else {
            Self::Accepted
        }
    }
}

/// Tag data as served by `GET /<tag>?json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagSnapshot {
    #[serde(rename = "type")]
    pub type_name: String,
    pub count: usize,
    #[serde(default)]
    pub data: Vec<f64>,
    #[serde(default)]
    pub ascii: Vec<String>,
}

/// Where tag writes go.
pub trait Transport {
    fn set_tag(&self, request: &SetRequest) -> Result<SetOutcome, ClientError>;

    fn fetch_tag(&self, tag: &TagPath) -> Result<TagSnapshot, ClientError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn set_tag(&self, request: &SetRequest) -> Result<SetOutcome, ClientError> {
        (**self).set_tag(request)
    }

    fn fetch_tag(&self, tag: &TagPath) -> Result<TagSnapshot, ClientError> {
        (**self).fetch_tag(tag)
    }
}

/// Blocking HTTP client for a tag server.
#[derive(Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
    endpoint: SmolStr,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// `endpoint` is the server base URL, e.g. `http://127.0.0.1:28080`.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ClientError> {
        let endpoint = normalize_endpoint(endpoint)?;
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        Ok(Self {
            agent: ureq::Agent::new_with_config(config),
            endpoint,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn set_url(&self) -> String {
        format!("{}{TAG_SET_PATH}", self.endpoint)
    }

    fn tag_url(&self, tag: &TagPath) -> String {
        format!("{}/{}?json", self.endpoint, urlencoding::encode(tag.root()))
    }
}

impl Transport for HttpTransport {
    fn set_tag(&self, request: &SetRequest) -> Result<SetOutcome, ClientError> {
        let url = self.set_url();
        let body = request.body();
        debug!("POST {url}: {body}");
        let mut response = self
            .agent
            .post(&url)
            .header("Content-Type", "text/plain")
            .header("Cache-Control", "no-cache")
            .send(body.as_str())
            .map_err(|err| transport_failure(&url, &err))?;
        let status = response.status();
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|err| transport_failure(&url, &err))?;
        if !status.is_success() {
            warn!("tag write to {} failed with HTTP {}", request.tag, status.as_u16());
            return Err(ClientError::TransportFailure(
                format!("{url}: HTTP {}", status.as_u16()).into(),
            ));
        }
        let outcome = SetOutcome::from_body(&text);
        debug!("tag write to {} answered {outcome:?}", request.tag);
        Ok(outcome)
    }

    fn fetch_tag(&self, tag: &TagPath) -> Result<TagSnapshot, ClientError> {
        let url = self.tag_url(tag);
        debug!("GET {url}");
        let mut response = self
            .agent
            .get(&url)
            .header("Cache-Control", "no-cache")
            .call()
            .map_err(|err| transport_failure(&url, &err))?;
        let status = response.status();
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|err| transport_failure(&url, &err))?;
        if !status.is_success() {
            return Err(ClientError::TransportFailure(
                format!("{url}: HTTP {}", status.as_u16()).into(),
            ));
        }
        serde_json::from_str(&text)
            .map_err(|err| ClientError::Readback(format!("{url}: {err}").into()))
    }
}

fn transport_failure(url: &str, err: &ureq::Error) -> ClientError {
    warn!("request to {url} failed: {err}");
    ClientError::TransportFailure(format!("{url}: {err}").into())
}

fn normalize_endpoint(endpoint: &str) -> Result<SmolStr, ClientError> {
    let trimmed = endpoint.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ClientError::InvalidConfig(
            format!("endpoint must start with http:// or https:// (got '{trimmed}')").into(),
        ));
    }
    Ok(trimmed.trim_end_matches('/').into())
}
