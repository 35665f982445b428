//! Shared JSON-over-HTTPS plumbing for the provider clients.

use std::time::Duration;

use reqwest::header::HeaderMap;
use serde_json::Value;
use tracing::debug;

use crate::AiError;

pub(crate) fn build_client() -> Result<reqwest::Client, AiError> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(120))
        .build()
        .map_err(|e| AiError::NetworkError(e.to_string()))
}

pub(crate) async fn post_json(
    http: &reqwest::Client,
    url: &str,
    headers: HeaderMap,
    body: &Value,
) -> Result<Value, AiError> {
    debug!(url, "POST");
    let response = http
        .post(url)
        .headers(headers)
        .json(body)
        .send()
        .await
        .map_err(|e| AiError::NetworkError(e.to_string()))?;
    collect_json(response).await
}

pub(crate) async fn get_json(
    http: &reqwest::Client,
    url: &str,
    headers: HeaderMap,
) -> Result<Value, AiError> {
    debug!(url, "GET");
    let response = http
        .get(url)
        .headers(headers)
        .send()
        .await
        .map_err(|e| AiError::NetworkError(e.to_string()))?;
    collect_json(response).await
}

async fn collect_json(response: reqwest::Response) -> Result<Value, AiError> {
    let status = response.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(AiError::RateLimited);
    }
    let text = response
        .text()
        .await
        .map_err(|e| AiError::NetworkError(e.to_string()))?;
    if !status.is_success() {
        return Err(AiError::ApiError(error_message(status.as_u16(), &text)));
    }
    if text.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(&text).map_err(|e| AiError::ParseError(e.to_string()))
}

/// Best human-readable message from a failed response body.
pub(crate) fn error_message(status: u16, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(msg) = json["error"]["message"].as_str() {
            return msg.to_string();
        }
        if let Some(msg) = json["error"].as_str() {
            return msg.to_string();
        }
    }
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {status}")
    } else {
        body.chars().take(200).collect()
    }
}

/// Header map from static names and dynamic values. Invalid values are
/// reported as API errors rather than panicking.
pub(crate) fn headers(pairs: &[(&'static str, &str)]) -> Result<HeaderMap, AiError> {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        let value = value
            .parse()
            .map_err(|_| AiError::ApiError(format!("invalid {name} header value")))?;
        map.insert(*name, value);
    }
    Ok(map)
}
