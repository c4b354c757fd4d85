//! HTTP utilities for service adapters
//!
//! Common request/response handling shared by the trivia, weather, music and
//! dictionary clients.

use super::ServiceError;
use crate::config::get_http_timeout_secs;
use reqwest::Client as HttpClient;
use serde_json::Value;
use std::time::Duration;

/// Creates an HTTP client configured with the standard service timeout.
///
/// Uses `HTTP_TIMEOUT_SECS` environment variable or 30s default.
#[must_use]
pub fn create_http_client() -> HttpClient {
    let timeout = Duration::from_secs(get_http_timeout_secs());
    HttpClient::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| HttpClient::new())
}

/// Sends a GET request and returns the parsed JSON body.
///
/// # Errors
///
/// Returns `ServiceError::Network` on connectivity issues, `ServiceError::Api` on
/// non-success status codes, or `ServiceError::Json` if parsing fails.
pub(crate) async fn get_json(
    client: &HttpClient,
    url: &str,
    query: &[(&str, &str)],
) -> Result<Value, ServiceError> {
    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| ServiceError::Network(e.without_url().to_string()))?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let error_text = response.text().await.unwrap_or_default();
        return Err(ServiceError::Api {
            status,
            message: clean_error_body(&error_text),
        });
    }

    response
        .json()
        .await
        .map_err(|e| ServiceError::Json(e.without_url().to_string()))
}

/// Shortens an error body for logging, hiding HTML error pages from proxies.
fn clean_error_body(body: &str) -> String {
    let trimmed = body.trim_start();
    if trimmed.starts_with("<!DOCTYPE") || trimmed.starts_with("<html") || trimmed.starts_with("<HTML")
    {
        return "(Server returned HTML error page)".to_string();
    }
    if body.chars().count() > 300 {
        let truncated: String = body.chars().take(300).collect();
        format!("{truncated}... (truncated)")
    } else {
        body.to_string()
    }
}

/// Extracts a string from a JSON value by navigating a path.
///
/// Numeric segments index into arrays, everything else is an object key.
///
/// # Errors
///
/// Returns `ServiceError::Json` if the path is invalid or the target is not a string.
pub(crate) fn extract_str(value: &Value, path: &[&str]) -> Result<String, ServiceError> {
    let mut current = value;

    for segment in path {
        current = if let Ok(index) = segment.parse::<usize>() {
            current
                .get(index)
                .ok_or_else(|| ServiceError::Json(format!("Invalid path: missing index {index}")))?
        } else {
            current
                .get(*segment)
                .ok_or_else(|| ServiceError::Json(format!("Invalid path: missing key {segment}")))?
        };
    }

    current
        .as_str()
        .map(ToString::to_string)
        .ok_or_else(|| ServiceError::Json(format!("Expected string at path, got: {current}")))
}
