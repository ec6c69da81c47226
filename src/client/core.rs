use crate::pending::{Identity, PendingRegistry};
use crate::pipeline::ResponseValidator;
use crate::token::Token;
use crate::transport::{Method, RequestDescriptor, Transport, TransportError};
use crate::{Error, Result};
use futures::future::{AbortHandle, Abortable};
use regex::Regex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::options::RequestOptions;

/// Invoked with the raw transport error on any transport-level failure.
pub type ErrorCallback = Arc<dyn Fn(&TransportError) + Send + Sync>;

/// Deduplicating HTTP request client.
///
/// At most one request per identity (path + verb) is in flight at a time; a new
/// request supersedes the prior one, whose caller observes [`Error::Cancelled`].
/// Each response runs through the validator pipeline before it reaches the
/// caller. Built via [`RequestClientBuilder`](crate::client::RequestClientBuilder).
pub struct RequestClient {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) base_url: String,
    pub(crate) token: Token,
    pub(crate) public_paths: Vec<Regex>,
    pub(crate) on_error: Option<ErrorCallback>,
    pub(crate) validator: ResponseValidator,
    pub(crate) timeout: Duration,
    pub(crate) pending: PendingRegistry,
    pub(crate) next_call: AtomicU64,
}

impl std::fmt::Debug for RequestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl RequestClient {
    /// Issue a GET request. Resolves with the response body on a 2xx status.
    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<serde_json::Value> {
        self.request(Method::Get, path, None, options).await
    }

    /// Issue a POST request with a JSON body. Resolves with the response body on
    /// a 2xx status.
    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
        options: RequestOptions,
    ) -> Result<serde_json::Value> {
        self.request(Method::Post, path, Some(body), options).await
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        options: RequestOptions,
    ) -> Result<serde_json::Value> {
        let mut descriptor = self.descriptor(method, path, body, &options);

        // Token injection runs before identity bookkeeping and is pure with
        // respect to the registry.
        if !self.is_public(path) {
            if let Some(token) = self.token.resolve() {
                descriptor
                    .headers
                    .insert("Authorization".to_string(), token);
            }
        }

        let identity = Identity::new(path, method);
        self.pending.supersede(&identity);

        let call = self.next_call.fetch_add(1, Ordering::Relaxed);
        let (abort, registration) = AbortHandle::new_pair();
        self.pending.register(identity.clone(), call, abort);

        debug!(%identity, call, "dispatching request");
        let outcome = Abortable::new(self.transport.send(descriptor), registration).await;

        match outcome {
            // Superseded: the registry entry now belongs to the newer request,
            // so this path must not touch it.
            Err(futures::future::Aborted) => Err(Error::Cancelled),
            Ok(Err(err)) => {
                self.pending.complete(&identity, call);
                if let Some(callback) = &self.on_error {
                    callback(&err);
                }
                Err(Error::Transport(err))
            }
            Ok(Ok(response)) => {
                // Removal happens before validation, so a concurrent request with
                // the same identity is never cancelled by this resolution path.
                self.pending.complete(&identity, call);

                let (response, _verdict) =
                    self.validator.validate(response, &options.validators).await;

                if response.is_success() {
                    Ok(response.body)
                } else {
                    Err(Error::Status(response))
                }
            }
        }
    }

    /// Merge the base configuration with per-call options into one descriptor.
    fn descriptor(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        options: &RequestOptions,
    ) -> RequestDescriptor {
        let mut headers = HashMap::new();
        headers.insert(
            "Content-Type".to_string(),
            "application/json;charset=utf-8".to_string(),
        );
        headers.extend(options.headers.clone());

        RequestDescriptor {
            method,
            url: format!("{}{}", self.base_url, path),
            headers,
            query: options.query.clone(),
            body,
            timeout: self.timeout,
        }
    }

    fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|pattern| pattern.is_match(path))
    }
}
