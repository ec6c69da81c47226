//! Transport abstraction for the request client.
//!
//! The client treats the transport as a black box that can send one request and
//! resolve with a status-bearing response. Cancellation is drop-based: the client
//! wraps the send future in an abortable wrapper, and dropping the future aborts
//! the underlying call.

pub mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// HTTP verb for an outgoing request.
///
/// Only the verbs the client exposes. The lowercase form participates in the
/// request identity used for deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully merged outgoing request: base configuration plus per-call options,
/// with the authorization header (if any) already injected.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub timeout: Duration,
}

/// A status-bearing response as reported by the transport.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Response {
    pub status: u16,
    pub body: serde_json::Value,
}

impl Response {
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }

    /// Whether the transport-reported status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The underlying network transport.
///
/// Implementations must resolve with a [`Response`] for any received HTTP status;
/// `Err` is reserved for transport-level failures (connect, timeout, protocol).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestDescriptor) -> Result<Response, TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
