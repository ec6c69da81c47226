use super::{Method, RequestDescriptor, Response, Transport, TransportError};
use async_trait::async_trait;

/// Default reqwest-backed transport.
///
/// The per-request timeout comes from the descriptor (merged from client
/// configuration), so the underlying client is built without one.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: RequestDescriptor) -> Result<Response, TransportError> {
        let mut req = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };

        for (name, value) in &request.headers {
            req = req.header(name, value);
        }

        if !request.query.is_empty() {
            req = req.query(&request.query);
        }

        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let response = req.timeout(request.timeout).send().await?;

        let status = response.status().as_u16();
        let text = response.text().await?;

        // Non-JSON bodies are delivered verbatim as a JSON string.
        let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));

        Ok(Response::new(status, body))
    }
}
