//! Error type for the Outline loader.
//!
//! Every failure is terminal for the load in progress. Nothing here is
//! retried or downgraded to a warning.

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The server answered with a non-2xx status.
    #[error("Outline API request to {url} failed (HTTP {status}): {body}")]
    Http {
        status: u16,
        url: String,
        body: String,
    },

    /// The request never produced a status (connect, TLS, timeout, ...).
    #[error("Outline API request to {url} could not be sent")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client itself could not be constructed.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The response body did not follow the `{data, pagination}` contract.
    #[error("malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    /// A `data` item could not be decoded into its typed record.
    #[error("failed to decode {what}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A document references a collection that was not resolved for this load.
    #[error("document {document_id} references unknown collection {collection_id}")]
    UnknownCollection {
        document_id: String,
        collection_id: String,
    },

    #[error("{message}")]
    InvalidConfig { message: String },
}

impl Error {
    /// HTTP status code, when the failure came from a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
