//! Validator pipeline: the middleware chain run over each response.
//!
//! # Execution model
//!
//! A pipeline is an ordered list of steps sharing one mutable [`PipelineContext`].
//! Each step receives the context and an explicit [`Next`] continuation over the
//! remaining steps. The chain is a conditional tap, not a filter: a step that
//! declines to act must still invoke the continuation so later steps run.
//!
//! ```text
//! Response → Step 0 → Step 1 → ... → Step n-1 → final context
//!              │         │               │
//!            next()    next()          next()
//! ```
//!
//! A pipeline is single-use: built fresh per response, executed once, discarded.
//! It holds no cross-request state.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`Pipeline`] | Ordered step list, consumed by [`Pipeline::execute`] |
//! | [`Step`] | Async middleware step trait |
//! | [`Next`] | Continuation over the remaining steps |
//! | [`PipelineContext`] | Response under validation plus the validation outcome |
//! | [`validate`] | Validator configs and the [`ResponseValidator`] that drives them |

pub mod validate;

pub use validate::{ResponseValidator, ValidatorConfig};

#[cfg(test)]
mod tests;

use crate::transport::Response;
use async_trait::async_trait;

/// Per-execution shared state.
///
/// `is_validate` starts unset and is overwritten by every validator whose
/// condition held, so the last matching validator in chain order decides the
/// final classification.
#[derive(Debug)]
pub struct PipelineContext {
    pub response: Response,
    pub is_validate: Option<bool>,
}

impl PipelineContext {
    pub fn new(response: Response) -> Self {
        Self {
            response,
            is_validate: None,
        }
    }
}

/// One middleware step in the chain.
///
/// Implementations must call `next.run(ctx)` exactly once on their success path,
/// whether or not they acted on the response. Returning an error aborts the
/// remaining chain.
#[async_trait]
pub trait Step: Send + Sync {
    async fn call(&self, ctx: &mut PipelineContext, next: Next<'_>) -> Result<(), PipelineError>;
}

/// Continuation over the steps that have not run yet.
pub struct Next<'a> {
    steps: &'a [Box<dyn Step>],
}

impl<'a> Next<'a> {
    /// Run the remaining chain to completion.
    pub async fn run(self, ctx: &mut PipelineContext) -> Result<(), PipelineError> {
        match self.steps.split_first() {
            Some((step, rest)) => step.call(ctx, Next { steps: rest }).await,
            None => Ok(()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("validator handler failed: {0}")]
    Handler(anyhow::Error),
}

/// Single-use ordered chain of steps.
pub struct Pipeline {
    steps: Vec<Box<dyn Step>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn push(&mut self, step: Box<dyn Step>) {
        self.steps.push(step);
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Drive the chain over `ctx`. Consumes the pipeline: one instance, one run.
    pub async fn execute(self, ctx: &mut PipelineContext) -> Result<(), PipelineError> {
        Next { steps: &self.steps }.run(ctx).await
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
