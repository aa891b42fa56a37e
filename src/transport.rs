//! Request dispatch and response validation for the v1 API.
//!
//! One request per call, no shared state, no retries. The dispatcher merges
//! headers, hands the request to `reqwest`, and normalizes every failure
//! into [`TransportError::Request`]; validation is a gate, not a transform.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use std::collections::HashMap;
use std::time::Duration;

use crate::config::TransportConfig;
use crate::error::TransportError;
use crate::headers::{build_headers, merge_headers};

/// Caller-supplied options for a single v1 request.
///
/// Entries the transport does not interpret (query params, raw body,
/// timeout) are forwarded to `reqwest` unmodified.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra request headers. Assembled transport headers overwrite
    /// same-named entries.
    pub headers: HashMap<String, String>,
    /// Query parameters, appended to the URL.
    pub query: Vec<(String, String)>,
    /// Raw request body bytes.
    pub body: Option<Vec<u8>>,
    /// Structured JSON body. The v1 transport does not accept one; any
    /// populated value is rejected before dispatch. Present only so the
    /// misuse can be diagnosed instead of silently dropped.
    pub json: Option<serde_json::Value>,
    /// Per-request timeout, forwarded to `reqwest`.
    pub timeout: Option<Duration>,
}

/// A completed v1 API response, buffered so the body can be inspected by
/// the validator and still handed back to the caller.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Whether the response indicates success (2xx/3xx).
    pub fn ok(&self) -> bool {
        self.status.as_u16() < 400
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw response body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Response body, lossily decoded as UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Best-effort structured parse of the body.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Central place to make any v1 API request.
///
/// Merges caller headers with the assembled transport headers (assembled
/// wins on conflict), dispatches through the given client, and validates
/// the response before returning it. The returned [`ApiResponse`] is the
/// completed response, untouched by validation.
///
/// # Errors
///
/// - [`TransportError::Usage`] if `options.json` is populated: the v1 API
///   does not handle arbitrary JSON bodies. Rejected before any network I/O.
/// - [`TransportError::Request`] for transport-level failures (no status
///   code unless a partial response was attached) and for completed
///   responses with a non-success status.
pub async fn request(
    client: &reqwest::Client,
    config: &TransportConfig,
    method: Method,
    url: &str,
    options: RequestOptions,
) -> Result<ApiResponse, TransportError> {
    if options.json.is_some() {
        return Err(TransportError::Usage(
            "v1 API does not handle arbitrary JSON bodies".to_string(),
        ));
    }

    let headers = merge_headers(&options.headers, build_headers(config)?);

    let mut rb = client.request(method.clone(), url).headers(headers);
    if !options.query.is_empty() {
        rb = rb.query(&options.query);
    }
    if let Some(body) = options.body {
        rb = rb.body(body);
    }
    if let Some(timeout) = options.timeout {
        rb = rb.timeout(timeout);
    }

    tracing::debug!(%method, url, "dispatching v1 api request");

    let resp = match rb.send().await {
        Ok(resp) => resp,
        Err(e) => return Err(transport_failure(&e)),
    };

    let status = resp.status();
    let headers = resp.headers().clone();
    let body = resp.bytes().await.map_err(|e| transport_failure(&e))?;

    let response = ApiResponse::new(status, headers, body);
    validate_response(&response)?;
    Ok(response)
}

/// Check a completed response, raising a structured error for failures.
///
/// Success (2xx/3xx) passes regardless of body content. Otherwise the body
/// is inspected for a structured `{"error": ...}` payload to derive the
/// error message, falling back to the raw body text, or `"No Content"`
/// when the body is empty.
pub fn validate_response(response: &ApiResponse) -> Result<(), TransportError> {
    if response.ok() {
        return Ok(());
    }

    let content = response.body();
    let status = response.status();

    let message = match response.json() {
        Ok(serde_json::Value::Object(parsed)) => match parsed.get("error") {
            Some(error) if json_truthy(error) => error_message(error),
            _ => fallback_message(content),
        },
        _ => fallback_message(content),
    };

    tracing::warn!(status = status.as_u16(), %message, "v1 api request failed");

    Err(TransportError::Request {
        message,
        status_code: Some(status.as_u16()),
        content: content.to_vec(),
    })
}

fn transport_failure(e: &reqwest::Error) -> TransportError {
    let message = match e.to_string() {
        m if m.is_empty() => "No message".to_string(),
        m => m,
    };
    TransportError::Request {
        message,
        status_code: e.status().map(|s| s.as_u16()),
        content: b"No content".to_vec(),
    }
}

fn fallback_message(content: &[u8]) -> String {
    if content.is_empty() {
        "No Content".to_string()
    } else {
        String::from_utf8_lossy(content).into_owned()
    }
}

fn error_message(error: &serde_json::Value) -> String {
    match error {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Truthiness of a structured `error` value: `false`, `null`, `0`, `""`,
/// `[]` and `{}` do not count as an error message.
fn json_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(a) => !a.is_empty(),
        serde_json::Value::Object(o) => !o.is_empty(),
    }
}
