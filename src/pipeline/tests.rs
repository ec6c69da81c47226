#[cfg(test)]
mod tests {
    use crate::pipeline::{Pipeline, PipelineContext, ResponseValidator, ValidatorConfig};
    use crate::transport::Response;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn ok_response() -> Response {
        Response::new(200, json!({"code": 0, "data": "payload"}))
    }

    /// Validator that appends its tag to a shared trace when it runs.
    fn tagged(trace: &Arc<Mutex<Vec<&'static str>>>, tag: &'static str) -> ValidatorConfig {
        let trace = trace.clone();
        ValidatorConfig::new(move |_res| {
            trace.lock().unwrap().push(tag);
            Ok(())
        })
    }

    #[tokio::test]
    async fn empty_validator_list_returns_the_response_untouched() {
        let validator = ResponseValidator::default();
        let original = ok_response();

        let (res, verdict) = validator.validate(original.clone(), &[]).await;

        assert_eq!(res, original);
        assert_eq!(verdict, None);
    }

    #[tokio::test]
    async fn validators_run_in_order_global_then_per_call() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let validator = ResponseValidator::new(vec![
            tagged(&trace, "global-0"),
            tagged(&trace, "global-1"),
        ]);
        let per_call = vec![tagged(&trace, "call-0"), tagged(&trace, "call-1")];

        validator.validate(ok_response(), &per_call).await;

        assert_eq!(
            *trace.lock().unwrap(),
            vec!["global-0", "global-1", "call-0", "call-1"]
        );
    }

    #[tokio::test]
    async fn last_matching_validator_decides_the_classification() {
        // First validator matches 200 and claims success; the second has no
        // condition, always runs, and overrides with failure.
        let validator = ResponseValidator::new(vec![
            ValidatorConfig::new(|_res| Ok(()))
                .condition(|res| res.status == 200)
                .is_success(true),
            ValidatorConfig::new(|_res| Ok(())).is_success(false),
        ]);

        let (_res, verdict) = validator.validate(ok_response(), &[]).await;

        assert_eq!(verdict, Some(false));
    }

    #[tokio::test]
    async fn false_condition_skips_the_handler_but_not_the_chain() {
        let ran = Arc::new(AtomicUsize::new(0));
        let skipped = ran.clone();
        let trace = Arc::new(Mutex::new(Vec::new()));

        let validator = ResponseValidator::new(vec![
            ValidatorConfig::new(move |_res| {
                skipped.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .condition(|res| res.status == 500)
            .is_success(false),
            tagged(&trace, "after"),
        ]);

        let (_res, verdict) = validator.validate(ok_response(), &[]).await;

        assert_eq!(ran.load(Ordering::SeqCst), 0);
        assert_eq!(*trace.lock().unwrap(), vec!["after"]);
        // No matching validator recorded a classification.
        assert_eq!(verdict, None);
    }

    #[tokio::test]
    async fn verdict_stays_unset_when_no_condition_matches() {
        let validator = ResponseValidator::new(vec![
            ValidatorConfig::new(|_res| Ok(()))
                .condition(|res| res.status == 404)
                .is_success(false),
        ]);

        let (_res, verdict) = validator.validate(ok_response(), &[]).await;
        assert_eq!(verdict, None);
    }

    #[tokio::test]
    async fn matching_validator_without_classification_clears_the_verdict() {
        let validator = ResponseValidator::new(vec![
            ValidatorConfig::new(|_res| Ok(())).is_success(true),
            // Runs unconditionally but declares no is_success.
            ValidatorConfig::new(|_res| Ok(())),
        ]);

        let (_res, verdict) = validator.validate(ok_response(), &[]).await;
        assert_eq!(verdict, None);
    }

    #[tokio::test]
    async fn handler_error_aborts_the_chain_and_still_delivers_the_response() {
        let after = Arc::new(AtomicUsize::new(0));
        let after_probe = after.clone();

        let validator = ResponseValidator::new(vec![
            ValidatorConfig::new(|_res| Err(anyhow::anyhow!("classification blew up"))),
            ValidatorConfig::new(move |_res| {
                after_probe.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .is_success(true),
        ]);

        let original = ok_response();
        let (res, verdict) = validator.validate(original.clone(), &[]).await;

        // The failing handler did not mutate the response, and the failure never
        // escaped validate().
        assert_eq!(res, original);
        assert_eq!(after.load(Ordering::SeqCst), 0);
        assert_eq!(verdict, None);
    }

    #[tokio::test]
    async fn handlers_mutate_the_response_in_place() {
        let validator = ResponseValidator::new(vec![ValidatorConfig::new(|res| {
            res.body["checked"] = json!(true);
            Ok(())
        })
        .is_success(true)]);

        let (res, verdict) = validator.validate(ok_response(), &[]).await;

        assert_eq!(res.body["checked"], json!(true));
        assert_eq!(verdict, Some(true));
    }

    #[tokio::test]
    async fn bare_pipeline_propagates_handler_errors() {
        let mut pipeline = Pipeline::new();
        pipeline.push(Box::new(ValidatorConfig::new(|_res| {
            Err(anyhow::anyhow!("boom"))
        })));

        let mut ctx = PipelineContext::new(ok_response());
        let err = pipeline.execute(&mut ctx).await.unwrap_err();
        assert!(err.to_string().contains("boom"));
    }
}
