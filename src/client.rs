//! Authenticated JSON client for the Outline API.
//!
//! Wraps a [`Transport`] with the base URL and API key, builds the request
//! headers, and turns non-2xx statuses into [`Error::Http`].

use serde_json::Value;

use crate::config::OutlineConfig;
use crate::error::{Error, Result};
use crate::transport::{HttpRequest, Transport};

pub const COLLECTIONS_LIST: &str = "/api/collections.list";
pub const COLLECTIONS_INFO: &str = "/api/collections.info";
pub const DOCUMENTS_LIST: &str = "/api/documents.list";
pub const DOCUMENTS_GROUP_MEMBERSHIPS: &str = "/api/documents.group_memberships";

pub struct OutlineClient<T> {
    config: OutlineConfig,
    transport: T,
}

impl<T: Transport> OutlineClient<T> {
    pub fn new(config: OutlineConfig, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// Resolve an endpoint or `nextPath` against the base URL.
    ///
    /// Absolute `http(s)://` targets are returned unchanged; anything else is
    /// appended to the base URL.
    pub fn resolve_url(&self, target: &str) -> String {
        if target.starts_with("http://") || target.starts_with("https://") {
            target.to_string()
        } else if target.starts_with('/') {
            format!("{}{}", self.config.base_url, target)
        } else {
            format!("{}/{}", self.config.base_url, target)
        }
    }

    /// POST `body` to `target` and parse the JSON response.
    pub fn post(&self, target: &str, body: &Value) -> Result<Value> {
        let url = self.resolve_url(target);
        let request = HttpRequest {
            url: url.clone(),
            headers: self.headers(),
            body: body.clone(),
        };

        let response = self.transport.post(&request)?;
        tracing::debug!(url = %url, status = response.status, "outline api call");

        if !response.is_success() {
            return Err(Error::Http {
                status: response.status,
                url,
                body: response.body.chars().take(500).collect(),
            });
        }

        serde_json::from_str(&response.body).map_err(|e| Error::MalformedResponse {
            url,
            message: format!("response is not valid JSON: {}", e),
        })
    }

    /// POST to a non-paginated endpoint and return its `data` value.
    pub fn fetch_data(&self, target: &str, body: &Value) -> Result<Value> {
        let mut envelope = self.post(target, body)?;
        match envelope.get_mut("data").map(Value::take) {
            Some(data) if !data.is_null() => Ok(data),
            _ => Err(Error::MalformedResponse {
                url: self.resolve_url(target),
                message: "missing `data`".to_string(),
            }),
        }
    }

    fn headers(&self) -> Vec<(String, String)> {
        vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.config.api_key),
            ),
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ]
    }
}
