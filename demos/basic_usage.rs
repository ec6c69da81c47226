//! Basic usage example.
//!
//! Builds a client with a token supplier, a public login path, and a global
//! validator, then issues a couple of requests.
//!
//! Usage:
//!   cargo run --example basic_usage

use serde_json::json;
use uniflight::{RequestClientBuilder, RequestOptions, ValidatorConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = RequestClientBuilder::new("https://httpbin.org")
        .token_supplier(|| std::env::var("API_TOKEN").unwrap_or_default())
        .public_path(regex::Regex::new("^/status")?)
        .on_error(|err| eprintln!("transport failure: {err}"))
        .validator(
            ValidatorConfig::new(|res| {
                println!("validating status {}", res.status);
                Ok(())
            })
            .condition(|res| res.status == 200)
            .is_success(true),
        )
        .build()?;

    let body = client.get("/json", RequestOptions::new()).await?;
    println!("GET /json -> {body}");

    let body = client
        .post("/anything", json!({"hello": "world"}), RequestOptions::new())
        .await?;
    println!("POST /anything -> {body}");

    Ok(())
}
