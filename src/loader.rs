//! Public entry point.
//!
//! ```rust,no_run
//! use outline_loader::{OutlineConfig, OutlineLoader};
//!
//! let config = OutlineConfig::new("https://outline.example.com", "ol_api_...")
//!     .with_collection_ids(["1899bf4d-98be-403a-baa2-ecc1e3361380"]);
//! let loader = OutlineLoader::new(config)?;
//!
//! for record in loader.lazy_load() {
//!     let record = record?;
//!     println!("{} {}", record.metadata.id, record.metadata.source);
//! }
//! # Ok::<(), outline_loader::Error>(())
//! ```

use crate::client::OutlineClient;
use crate::config::OutlineConfig;
use crate::documents::DocumentStream;
use crate::error::Result;
use crate::models::OutlineRecord;
use crate::transport::{ReqwestTransport, Transport};

pub struct OutlineLoader<T = ReqwestTransport> {
    client: OutlineClient<T>,
}

impl OutlineLoader<ReqwestTransport> {
    /// Build a loader backed by a blocking reqwest client.
    pub fn new(config: OutlineConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout_secs)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> OutlineLoader<T> {
    pub fn with_transport(config: OutlineConfig, transport: T) -> Result<Self> {
        Ok(Self {
            client: OutlineClient::new(config, transport)?,
        })
    }

    pub fn client(&self) -> &OutlineClient<T> {
        &self.client
    }

    /// Stream records one at a time.
    ///
    /// Nothing is requested until the stream is first polled. The stream is
    /// single-pass: once it returns `None` or an error it stays exhausted.
    /// Calling `lazy_load` again starts a fresh load.
    pub fn lazy_load(&self) -> DocumentStream<'_, T> {
        DocumentStream::new(&self.client)
    }

    /// Load every record, or fail with the first error.
    pub fn load(&self) -> Result<Vec<OutlineRecord>> {
        self.lazy_load().collect()
    }
}
