use crate::pipeline::PipelineError;
use crate::transport::{Response, TransportError};
use thiserror::Error;

/// Unified error type for the library.
///
/// Only `Transport`, `Status`, and `Cancelled` reach callers of the request path:
/// cancellation surfaces to the superseded caller only, transport failures are also
/// routed through the configured error callback, and HTTP failure statuses carry
/// the full response. Validator failures are logged and suppressed internally.
#[derive(Debug, Error)]
pub enum Error {
    /// The request was superseded by a newer request with the same identity.
    #[error("request superseded by a newer request with the same identity")]
    Cancelled,

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A response arrived but its status does not indicate success.
    /// Carries the full response, body included.
    #[error("http failure status {}", .0.status)]
    Status(Response),

    #[error("pipeline processing error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// The response carried by an HTTP failure status, if that is what this is.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::Status(res) => Some(res),
            _ => None,
        }
    }
}
