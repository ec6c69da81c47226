//! Deduplicating request client.
//!
//! Keep the public surface small and predictable: a builder, the client, and the
//! per-call options. Implementation details live in submodules under `src/client/`.

pub mod builder;
pub mod core;
pub mod options;

pub use builder::RequestClientBuilder;
pub use options::RequestOptions;
pub use self::core::{ErrorCallback, RequestClient};
