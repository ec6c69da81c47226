use crate::pipeline::ValidatorConfig;
use std::collections::HashMap;

/// Per-call options merged over the client's base configuration.
///
/// Per-call validators run after the globally registered ones, in declaration
/// order. Query parameters do not participate in the request identity used for
/// deduplication.
#[derive(Clone, Default)]
pub struct RequestOptions {
    pub headers: HashMap<String, String>,
    pub query: Vec<(String, String)>,
    pub validators: Vec<ValidatorConfig>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn validator(mut self, validator: ValidatorConfig) -> Self {
        self.validators.push(validator);
        self
    }
}
