//! AWS Lambda handler for calculator estimates
//!
//! POST a calculator form as JSON to receive the estimate; GET returns the
//! calculator catalog. Every request is independent; assumptions are loaded
//! once per cold start.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::{info, warn};
use premium_estimator::{catalog, EstimateError, EstimateRunner, RateAssumptions, RawPolicyInput};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;

/// Directory holding rates.csv; built-in rates are used when unset
const ASSUMPTIONS_ENV: &str = "RATE_ASSUMPTIONS_PATH";

/// Status and JSON body, before CORS headers are attached
#[derive(Debug)]
struct Reply {
    status: u16,
    body: Option<String>,
}

impl Reply {
    fn json(status: u16, value: serde_json::Value) -> Self {
        Self {
            status,
            body: Some(value.to_string()),
        }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self::json(status, json!({ "error": message.into() }))
    }
}

/// Route one request; kept free of the Lambda types so it can be tested directly
fn route(runner: &EstimateRunner, method: &str, body: &str) -> Reply {
    match method {
        "OPTIONS" => Reply { status: 200, body: None },
        "GET" => Reply::json(200, json!({ "calculators": catalog() })),
        "POST" => estimate(runner, body),
        other => Reply::error(405, format!("Method {} not allowed", other)),
    }
}

fn estimate(runner: &EstimateRunner, body: &str) -> Reply {
    let body = if body.trim().is_empty() { "{}" } else { body };

    let raw: RawPolicyInput = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return Reply::error(400, format!("Invalid JSON: {}", e)),
    };

    match runner.run_raw(&raw) {
        Ok(result) => match serde_json::to_value(&result) {
            Ok(value) => Reply::json(200, value),
            Err(e) => Reply::error(500, format!("Failed to serialize estimate: {}", e)),
        },
        Err(EstimateError::Validation(errors)) => Reply::json(
            400,
            json!({ "error": "Invalid policy input", "fields": errors }),
        ),
        Err(e @ EstimateError::UnknownCalculator(_)) => Reply::error(400, e.to_string()),
        Err(e @ EstimateError::Overflow(_)) => Reply::error(422, e.to_string()),
    }
}

fn to_response(reply: Reply) -> Result<Response<Body>, Error> {
    let builder = Response::builder()
        .status(reply.status)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type");

    let response = match reply.body {
        Some(text) => builder
            .header("Content-Type", "application/json")
            .body(Body::Text(text))?,
        None => builder.body(Body::Empty)?,
    };
    Ok(response)
}

/// Lambda handler function
async fn handler(runner: &EstimateRunner, event: Request) -> Result<Response<Body>, Error> {
    let body = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => String::new(),
    };

    let reply = route(runner, event.method().as_str(), &body);
    if reply.status >= 400 {
        warn!("{} {} -> {}", event.method(), event.uri().path(), reply.status);
    }
    to_response(reply)
}

fn load_runner() -> Result<EstimateRunner, Error> {
    match std::env::var(ASSUMPTIONS_ENV) {
        Ok(dir) => {
            info!("Loading rate assumptions from {}", dir);
            Ok(EstimateRunner::from_csv_path(Path::new(&dir))?)
        }
        Err(_) => Ok(EstimateRunner::with_assumptions(RateAssumptions::default_pricing())),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let runner = Arc::new(load_runner()?);
    run(service_fn(move |event: Request| {
        let runner = Arc::clone(&runner);
        async move { handler(&runner, event).await }
    }))
    .await
}
