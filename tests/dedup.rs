//! Public-surface deduplication behavior, exercised through a custom transport.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use uniflight::{
    Error, RequestClientBuilder, RequestDescriptor, RequestOptions, Response, Transport,
};
use uniflight::transport::TransportError;

/// Transport that answers every request with 200 after a short delay, leaving a
/// window in which a duplicate can supersede.
struct SlowTransport;

#[async_trait]
impl Transport for SlowTransport {
    async fn send(&self, _request: RequestDescriptor) -> Result<Response, TransportError> {
        tokio::time::sleep(Duration::from_millis(20)).await;
        Ok(Response::new(200, json!({"ok": true})))
    }
}

#[tokio::test]
async fn duplicate_get_cancels_the_in_flight_one() {
    let client = RequestClientBuilder::new("https://api.test")
        .transport(Arc::new(SlowTransport))
        .build()
        .unwrap();

    let (first, second) = tokio::join!(
        client.get("/users", RequestOptions::new()),
        client.get("/users", RequestOptions::new()),
    );

    let err = first.unwrap_err();
    assert!(matches!(err, Error::Cancelled));
    // The cancellation reason is fixed and recognizable.
    assert!(err.to_string().contains("superseded"));

    assert_eq!(second.unwrap(), json!({"ok": true}));
}

#[tokio::test]
async fn a_request_issued_after_resolution_is_not_cancelled() {
    let client = RequestClientBuilder::new("https://api.test")
        .transport(Arc::new(SlowTransport))
        .build()
        .unwrap();

    // Sequential requests with the same identity never supersede each other.
    client.get("/users", RequestOptions::new()).await.unwrap();
    client.get("/users", RequestOptions::new()).await.unwrap();
}
