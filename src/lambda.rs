#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "lambda")]
use skillnest_upload::utils::logger;
#[cfg(feature = "lambda")]
use skillnest_upload::{
    handle_request, GatewayConfig, GatewayRequest, GatewayResponse, GithubContents, CORS_HEADERS,
};
#[cfg(feature = "lambda")]
use std::collections::HashMap;

/// API Gateway proxy request, narrowed to the fields the gateway consumes.
#[cfg(feature = "lambda")]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
}

#[cfg(feature = "lambda")]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    let request = GatewayRequest::new(event.payload.http_method, event.payload.body);

    // Configuration is resolved per invocation; every invocation is assumed
    // to be a cold start and nothing is cached across them.
    let store = GatewayConfig::from_env().map(GithubContents::new);
    let response = handle_request(&request, store).await;

    Ok(into_proxy_response(response))
}

#[cfg(feature = "lambda")]
fn into_proxy_response(response: GatewayResponse) -> Response {
    let mut headers: HashMap<String, String> = CORS_HEADERS
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    let body = match response.body {
        Some(value) => {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
            value.to_string()
        }
        None => String::new(),
    };

    Response {
        status_code: response.status,
        headers,
        body,
    }
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();
    run(service_fn(function_handler)).await
}
