//! HTTP wrapper for JSON calls against the identity service. Every request is
//! built against the configured base URL, carries `Content-Type:
//! application/json` unless the caller overrides it, and shares one cookie jar
//! so cookies set by the service are sent back on later calls.
//!
//! Non-2xx responses become `AppError::Http`. The body of a failed response is
//! always read: a `detail` field is preferred, then the raw text, then a generic
//! message. The wrapper never touches the session store and never logs bodies
//! or headers, which carry passwords and tokens.

use super::errors::AppError;
use crate::APP_USER_AGENT;
use reqwest::{
    Client, Method, Response,
    header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::time::Duration;
use tracing::{Instrument, debug, info_span};

/// Default request timeout applied when the configuration does not set one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Maximum number of error body characters surfaced to callers.
const MAX_ERROR_CHARS: usize = 200;
const GENERIC_ERROR: &str = "Request failed.";

/// Method, body and extra headers for one call.
#[derive(Default)]
pub struct RequestOptions {
    method: Method,
    body: Option<String>,
    headers: Vec<(String, String)>,
}

impl RequestOptions {
    #[must_use]
    pub fn get() -> Self {
        Self::with_method(Method::GET)
    }

    #[must_use]
    pub fn post() -> Self {
        Self::with_method(Method::POST)
    }

    #[must_use]
    pub fn with_method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Encodes `body` as the JSON request payload.
    ///
    /// # Errors
    /// Returns `AppError::Serialization` if the body cannot be encoded.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, AppError> {
        let payload = serde_json::to_string(body)
            .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;
        self.body = Some(payload);
        Ok(self)
    }

    /// Adds a header; caller headers win over the defaults.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {token}"))
    }
}

/// Shared HTTP client bound to one API base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client with a cookie jar, the crate user agent and `timeout`.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the underlying client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for `path` under the configured base.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }

    /// Performs the call and decodes a successful body as `T`.
    ///
    /// # Errors
    /// Returns `AppError::Network`/`Timeout` when the server cannot be reached,
    /// `AppError::Http` on a non-2xx status and `AppError::Parse` when a
    /// successful body is not the expected JSON.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, AppError> {
        let url = self.url(endpoint);
        let headers = merge_headers(&options.headers)?;

        let span = info_span!("api.request", http.method = %options.method, path = endpoint);

        let mut builder = self.client.request(options.method, &url).headers(headers);
        if let Some(body) = options.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .instrument(span)
            .await
            .map_err(map_request_error)?;

        handle_json_response(response).await
    }

    /// Shorthand for a `GET` without extra headers.
    ///
    /// # Errors
    /// See [`ApiClient::request`].
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, AppError> {
        self.request(endpoint, RequestOptions::get()).await
    }

    /// Shorthand for a JSON `POST`.
    ///
    /// # Errors
    /// See [`ApiClient::request`].
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, AppError> {
        self.request(endpoint, RequestOptions::post().json(body)?).await
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Default JSON content type first, then caller headers on top.
fn merge_headers(extra: &[(String, String)]) -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| AppError::Serialization(format!("Invalid header name: {err}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|err| AppError::Serialization(format!("Invalid header value: {err}")))?;
        headers.insert(name, value);
    }

    Ok(headers)
}

/// Maps transport errors into `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else if err.is_decode() {
        AppError::Parse(format!("Failed to decode response: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();

    if status.is_success() {
        let body = response.bytes().await.map_err(map_request_error)?;
        serde_json::from_slice(&body)
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), "request rejected");
        Err(AppError::Http {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<Value>,
}

/// Picks the user-facing message out of a failed response body.
fn error_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return GENERIC_ERROR.to_string();
    }

    if let Ok(ErrorBody {
        detail: Some(detail),
    }) = serde_json::from_str::<ErrorBody>(trimmed)
    {
        if let Some(message) = detail_message(&detail) {
            return truncate(&message);
        }
    }

    truncate(trimmed)
}

/// `detail` is either a string or a list of validation errors with `msg`.
fn detail_message(detail: &Value) -> Option<String> {
    let message = match detail {
        Value::String(message) => message.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        _ => String::new(),
    };

    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}

fn truncate(message: &str) -> String {
    message.chars().take(MAX_ERROR_CHARS).collect()
}
