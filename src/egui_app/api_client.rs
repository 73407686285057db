//! HTTP Client Wrapper
//!
//! Single point of outbound network configuration. Every request goes
//! through [`ApiClient`], which:
//!
//! - prefixes the configured server URL,
//! - attaches the stored admin token as a bearer credential when one exists,
//! - tags the request with an `X-Request-Id` for log correlation,
//! - normalizes failures into [`ApiError`].
//!
//! A 401 on a request that carried a token is reported as
//! [`ApiError::SessionExpired`], together with the token that was sent, so
//! the auth layer can force a re-login for that session only. A 401 on an
//! anonymous request is an ordinary [`ApiError::Api`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::egui_app::config::Config;
use crate::egui_app::credential_store::{CredentialStore, ADMIN_TOKEN_KEY};

const GENERIC_API_ERROR: &str = "Unexpected API error";
const MAX_PLAIN_ERROR_LEN: usize = 200;

/// Bearer token carried by a request the server rejected. Never printed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SentToken(String);

impl SentToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SentToken(..)")
    }
}

/// Failure of an outbound API call
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("invalid API method: {0}")]
    InvalidMethod(String),

    /// No response was received
    #[error("network error: {0}")]
    Network(String),

    /// 401 on a request that carried a bearer token
    #[error("session expired")]
    SessionExpired(SentToken),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::SessionExpired(_) => Some(401),
            _ => None,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired(_))
    }

    /// Text suitable for a dismissable notification
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Could not reach the server. Please check your connection and try again."
                    .to_string()
            }
            ApiError::SessionExpired(_) => "Session expired. Please log in again.".to_string(),
            ApiError::Api { message, .. } => message.clone(),
            ApiError::InvalidMethod(_) | ApiError::Decode(_) => GENERIC_API_ERROR.to_string(),
        }
    }
}

/// HTTP methods the wrapper accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl FromStr for ApiMethod {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(ApiMethod::Get),
            "post" => Ok(ApiMethod::Post),
            "put" => Ok(ApiMethod::Put),
            "delete" => Ok(ApiMethod::Delete),
            _ => Err(ApiError::InvalidMethod(s.to_string())),
        }
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ApiMethod::Get => "GET",
            ApiMethod::Post => "POST",
            ApiMethod::Put => "PUT",
            ApiMethod::Delete => "DELETE",
        })
    }
}

impl From<ApiMethod> for reqwest::Method {
    fn from(method: ApiMethod) -> Self {
        match method {
            ApiMethod::Get => reqwest::Method::GET,
            ApiMethod::Post => reqwest::Method::POST,
            ApiMethod::Put => reqwest::Method::PUT,
            ApiMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Configured API client, cheap to clone
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build the client once at start-up from the resolved configuration
    pub fn configure(
        config: &Config,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.server_url().to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Issue a request with a method given by name (`get`, `post`, `put`,
    /// `delete`). Any other method fails before touching the network.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let method: ApiMethod = method.parse()?;
        self.send(method, path, body).await
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.send::<Value>(ApiMethod::Get, path, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        self.send(ApiMethod::Post, path, Some(body)).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        decode(self.get(path).await?)
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        decode(self.post(path, body).await?)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: ApiMethod,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let request_id = Uuid::new_v4();

        let mut builder = self
            .client
            .request(method.into(), &url)
            .header("X-Request-Id", request_id.to_string());

        let token = self.bearer_token().await;
        let authenticated = token.is_some();
        if let Some(token) = &token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        debug!(%method, path, %request_id, authenticated, "sending request");
        let started = Instant::now();

        let response = builder.send().await.map_err(|e| {
            warn!(%method, path, %request_id, error = %e, "request failed without response");
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if status.is_success() {
            debug!(%method, path, %request_id, status = status.as_u16(), elapsed_ms, "request completed");
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()));
        }

        warn!(%method, path, %request_id, status = status.as_u16(), elapsed_ms, "request rejected");

        if status == StatusCode::UNAUTHORIZED {
            if let Some(token) = token {
                return Err(ApiError::SessionExpired(SentToken(token)));
            }
        }

        Err(ApiError::Api {
            status: status.as_u16(),
            message: error_message(&text),
        })
    }

    /// Stored token, if any. A storage failure degrades to an anonymous
    /// request; the server decides whether that is acceptable.
    async fn bearer_token(&self) -> Option<String> {
        match self.credentials.get_item(ADMIN_TOKEN_KEY).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "could not read stored token");
                None
            }
        }
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pull a human-readable message out of an error body
fn error_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return GENERIC_API_ERROR.to_string();
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => ["error", "message"]
            .iter()
            .filter_map(|field| value.get(*field).and_then(Value::as_str))
            .map(str::trim)
            .find(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| GENERIC_API_ERROR.to_string()),
        Err(_) if trimmed.len() <= MAX_PLAIN_ERROR_LEN && !trimmed.starts_with('<') => {
            trimmed.to_string()
        }
        Err(_) => GENERIC_API_ERROR.to_string(),
    }
}
