//! Authorization token source supplied by the caller.

use std::sync::Arc;

/// Where the authorization header value comes from.
///
/// Resolved by pattern match at injection time, once per request. A supplier is
/// invoked on every injection so it can return a fresh value each time.
#[derive(Clone, Default)]
pub enum Token {
    Fixed(String),
    Supplier(Arc<dyn Fn() -> String + Send + Sync>),
    #[default]
    Absent,
}

impl Token {
    /// Resolve the current token value; `None` when no token is configured.
    pub fn resolve(&self) -> Option<String> {
        match self {
            Token::Fixed(value) => Some(value.clone()),
            Token::Supplier(supplier) => Some(supplier()),
            Token::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Token::Absent)
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Fixed(_) => f.write_str("Token::Fixed(..)"),
            Token::Supplier(_) => f.write_str("Token::Supplier(..)"),
            Token::Absent => f.write_str("Token::Absent"),
        }
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token::Fixed(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token::Fixed(value.to_string())
    }
}
