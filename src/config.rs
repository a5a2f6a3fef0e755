//! Loader configuration.
//!
//! [`OutlineConfig`] is the immutable value handed to
//! [`OutlineLoader`](crate::loader::OutlineLoader). The library never looks
//! up credentials on its own; [`load_config`] is the only place that reads a
//! file or the environment, and it is meant for the CLI.
//!
//! # File format
//!
//! ```toml
//! [outline]
//! base_url = "https://outline.example.com"
//! api_key_env = "OUTLINE_API_KEY"   # or: api_key = "ol_api_..."
//! collection_ids = []               # empty = every collection
//! page_limit = 25
//! timeout_secs = 30
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::error::Error;

pub const DEFAULT_PAGE_LIMIT: u32 = 25;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for one Outline instance.
#[derive(Clone, PartialEq, Eq)]
pub struct OutlineConfig {
    /// Service root, without a trailing `/` (e.g. `http://outline.test`).
    pub base_url: String,
    /// API token sent as `Authorization: Bearer <api_key>`.
    pub api_key: String,
    /// Collections to scan. Empty means every collection visible to the token.
    pub collection_ids: Vec<String>,
    /// `limit` sent with the first request of every paginated listing.
    pub page_limit: u32,
    /// Per-request timeout used by the reqwest transport.
    pub timeout_secs: u64,
}

impl OutlineConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            collection_ids: Vec::new(),
            page_limit: DEFAULT_PAGE_LIMIT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_collection_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collection_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        let invalid = |message: &str| {
            Err(Error::InvalidConfig {
                message: message.to_string(),
            })
        };

        if self.base_url.is_empty() {
            return invalid("outline.base_url must not be empty");
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return invalid("outline.base_url must start with http:// or https://");
        }
        if self.api_key.trim().is_empty() {
            return invalid("outline.api_key must not be empty");
        }
        if self.page_limit == 0 {
            return invalid("outline.page_limit must be >= 1");
        }
        if self.timeout_secs == 0 {
            return invalid("outline.timeout_secs must be >= 1");
        }
        if self.collection_ids.iter().any(|id| id.trim().is_empty()) {
            return invalid("outline.collection_ids must not contain empty ids");
        }
        Ok(())
    }
}

impl fmt::Debug for OutlineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutlineConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("collection_ids", &self.collection_ids)
            .field("page_limit", &self.page_limit)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    outline: OutlineSection,
}

#[derive(Debug, Deserialize)]
struct OutlineSection {
    base_url: String,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    api_key_env: Option<String>,
    #[serde(default)]
    collection_ids: Vec<String>,
    #[serde(default = "default_page_limit")]
    page_limit: u32,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

fn default_page_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

pub fn load_config(path: &Path) -> Result<OutlineConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

/// Parse and validate the TOML body of a config file.
pub fn parse_config(content: &str) -> Result<OutlineConfig> {
    let file: ConfigFile = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    let section = file.outline;

    // An inline key wins over the environment
    let api_key = match (section.api_key, section.api_key_env) {
        (Some(key), _) => key,
        (None, Some(var)) => std::env::var(&var)
            .with_context(|| format!("{} environment variable not set", var))?,
        (None, None) => anyhow::bail!("outline.api_key or outline.api_key_env must be set"),
    };

    let config = OutlineConfig::new(section.base_url, api_key)
        .with_collection_ids(section.collection_ids)
        .with_page_limit(section.page_limit)
        .with_timeout_secs(section.timeout_secs);
    config.validate()?;

    Ok(config)
}
