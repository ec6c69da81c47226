//! Response validators and the driver that runs them as a pipeline.

use super::{Next, Pipeline, PipelineContext, PipelineError, Step};
use crate::transport::Response;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

type Condition = Arc<dyn Fn(&Response) -> bool + Send + Sync>;
type Handler = Arc<dyn Fn(&mut Response) -> anyhow::Result<()> + Send + Sync>;

/// One response validator: an optional condition, a handler, and the
/// classification to record when the condition holds.
///
/// The handler inspects or mutates the response in place; it does not replace it.
/// A missing condition means the validator always applies.
#[derive(Clone)]
pub struct ValidatorConfig {
    condition: Option<Condition>,
    handler: Handler,
    is_success: Option<bool>,
}

impl ValidatorConfig {
    pub fn new(handler: impl Fn(&mut Response) -> anyhow::Result<()> + Send + Sync + 'static) -> Self {
        Self {
            condition: None,
            handler: Arc::new(handler),
            is_success: None,
        }
    }

    /// Only run the handler when `condition` holds. The chain still continues
    /// past this validator either way.
    pub fn condition(mut self, condition: impl Fn(&Response) -> bool + Send + Sync + 'static) -> Self {
        self.condition = Some(Arc::new(condition));
        self
    }

    /// Classification recorded in the context when this validator runs.
    pub fn is_success(mut self, is_success: bool) -> Self {
        self.is_success = Some(is_success);
        self
    }
}

#[async_trait]
impl Step for ValidatorConfig {
    async fn call(&self, ctx: &mut PipelineContext, next: Next<'_>) -> Result<(), PipelineError> {
        let applies = self
            .condition
            .as_ref()
            .map(|condition| condition(&ctx.response))
            .unwrap_or(true);

        if applies {
            (self.handler)(&mut ctx.response).map_err(PipelineError::Handler)?;
            // Last matching validator wins; an unset is_success overwrites too.
            ctx.is_validate = self.is_success;
        }

        next.run(ctx).await
    }
}

/// Holds the globally registered validators and runs them, plus any per-call
/// validators, over one response.
#[derive(Clone, Default)]
pub struct ResponseValidator {
    validators: Vec<ValidatorConfig>,
}

impl ResponseValidator {
    pub fn new(initial: Vec<ValidatorConfig>) -> Self {
        Self { validators: initial }
    }

    /// Run all applicable validators over `response` in order: global first,
    /// then `extra` in declaration order.
    ///
    /// Validation is best-effort and never blocks delivery: a handler error
    /// aborts the remaining chain, is logged, and the response is returned
    /// regardless. The returned flag is the final classification, unset when no
    /// validator's condition held.
    pub async fn validate(
        &self,
        response: Response,
        extra: &[ValidatorConfig],
    ) -> (Response, Option<bool>) {
        // Fast path: nothing registered, nothing to build.
        if self.validators.is_empty() && extra.is_empty() {
            return (response, None);
        }

        let mut pipeline = Pipeline::new();
        for validator in self.validators.iter().chain(extra) {
            pipeline.push(Box::new(validator.clone()));
        }

        let mut ctx = PipelineContext::new(response);
        if let Err(err) = pipeline.execute(&mut ctx).await {
            warn!(error = %err, "validator pipeline failed; delivering response unvalidated");
        }

        (ctx.response, ctx.is_validate)
    }
}
