//! HTTP transport seam.
//!
//! The loader only ever issues JSON `POST`s, so the transport surface is a
//! single method. [`ReqwestTransport`] is the production implementation;
//! tests substitute an in-memory one.

use std::time::Duration;

use serde_json::Value;

use crate::error::{Error, Result};

/// One outgoing `POST`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a completed exchange. Status checking is left to
/// the caller so that non-2xx bodies can be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Transport {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse> {
        (**self).post(request)
    }
}

/// Blocking transport over `reqwest`.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(Error::Client)?;
        Ok(Self { client })
    }

    /// Use a preconfigured client (custom proxy, TLS roots, ...).
    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .body(request.body.to_string())
            .send()
            .map_err(|source| Error::Request {
                url: request.url.clone(),
                source,
            })?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|source| Error::Request {
            url: request.url.clone(),
            source,
        })?;

        Ok(HttpResponse { status, body })
    }
}
