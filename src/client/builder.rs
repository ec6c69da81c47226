use crate::client::core::{ErrorCallback, RequestClient};
use crate::pending::PendingRegistry;
use crate::pipeline::{ResponseValidator, ValidatorConfig};
use crate::token::Token;
use crate::transport::{HttpTransport, Transport, TransportError};
use crate::{Error, Result};
use regex::Regex;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builder for creating clients with custom configuration.
///
/// Everything configured here is immutable after `build`; only the pending
/// registry mutates at runtime.
pub struct RequestClientBuilder {
    base_url: String,
    token: Token,
    public_paths: Vec<Regex>,
    on_error: Option<ErrorCallback>,
    validators: Vec<ValidatorConfig>,
    timeout: Duration,
    transport: Option<Arc<dyn Transport>>,
}

impl RequestClientBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: Token::Absent,
            public_paths: Vec::new(),
            on_error: None,
            validators: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            transport: None,
        }
    }

    /// Use a fixed authorization token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Token::Fixed(token.into());
        self
    }

    /// Use a supplier invoked once per request, so rotated tokens are picked up.
    pub fn token_supplier(mut self, supplier: impl Fn() -> String + Send + Sync + 'static) -> Self {
        self.token = Token::Supplier(Arc::new(supplier));
        self
    }

    /// Paths matching any of these patterns are exempt from token injection.
    pub fn public_path(mut self, pattern: Regex) -> Self {
        self.public_paths.push(pattern);
        self
    }

    /// Callback invoked with every transport-level failure. Never invoked for
    /// ordinary non-2xx HTTP statuses.
    pub fn on_error(mut self, callback: impl Fn(&TransportError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(callback));
        self
    }

    /// Register a global validator; runs before any per-call validators.
    pub fn validator(mut self, validator: ValidatorConfig) -> Self {
        self.validators.push(validator);
        self
    }

    /// Per-request timeout applied at the transport. Default 10 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the transport.
    ///
    /// This is primarily for testing with mock transports. In production the
    /// default reqwest transport is used.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<RequestClient> {
        url::Url::parse(&self.base_url)
            .map_err(|e| Error::Configuration(format!("invalid base url {:?}: {e}", self.base_url)))?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new()?),
        };

        Ok(RequestClient {
            transport,
            base_url: self.base_url,
            token: self.token,
            public_paths: self.public_paths,
            on_error: self.on_error,
            validator: ResponseValidator::new(self.validators),
            timeout: self.timeout,
            pending: PendingRegistry::new(),
            next_call: AtomicU64::new(0),
        })
    }
}
