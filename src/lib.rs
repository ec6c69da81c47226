//! # uniflight
//!
//! An HTTP request client that layers two behaviors on top of a generic transport:
//!
//! - **In-flight deduplication**: requests are keyed by an identity derived from
//!   their path and verb. Issuing a new request for an identity that already has a
//!   request in flight supersedes (aborts) the prior one; the superseded caller
//!   receives a fixed, recognizable cancellation error.
//! - **Validator pipeline**: an ordered middleware chain of response validators runs
//!   once over each response before it reaches the caller. Validators are registered
//!   globally at client construction and per call; per-call validators run after the
//!   global ones. Validation is best-effort and never blocks delivery of a response.
//!
//! The underlying HTTP transport sits behind the [`transport::Transport`] trait; a
//! reqwest-backed [`transport::HttpTransport`] is the default.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use uniflight::RequestClientBuilder;
//!
//! #[tokio::main]
//! async fn main() -> uniflight::Result<()> {
//!     let client = RequestClientBuilder::new("https://api.example.com")
//!         .token("secret")
//!         .build()?;
//!
//!     let body = client.get("/users", Default::default()).await?;
//!     println!("{body}");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Request client, builder, and per-call options |
//! | [`pipeline`] | Validator middleware chain and its execution engine |
//! | [`token`] | Authorization token source (fixed value, supplier, or absent) |
//! | [`transport`] | Transport trait, request/response shapes, reqwest transport |
//! | [`error`] | Unified error type |

pub mod client;
pub mod error;
pub mod pipeline;
pub mod token;
pub mod transport;

mod pending;

// Re-export main types for convenience
pub use client::{RequestClient, RequestClientBuilder, RequestOptions};
pub use pipeline::{ResponseValidator, ValidatorConfig};
pub use token::Token;
pub use transport::{HttpTransport, Method, RequestDescriptor, Response, Transport};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

pub use error::Error;
