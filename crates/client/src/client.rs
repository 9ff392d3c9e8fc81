//! HTTP client for the Tunicoin REST API.
//!
//! Every request goes through [`ApiClient::send`], which attaches the
//! session's bearer token and handles a 401 by refreshing the access token
//! once and replaying the request. Requests are built from a closure so the
//! replay is a fresh request carrying the new token.

use log::{debug, info, warn};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use tunicoin_core::auth::{RefreshTokenRequest, RefreshTokenResponse};

use crate::errors::{error_from_response, ClientError, Result};
use crate::session::Session;

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default base URL of the API during local development.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

const REFRESH_PATH: &str = "/api/auth/refresh";

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// API Client
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP client bound to one [`Session`].
///
/// Cheap to clone; clones share the connection pool, the session and the
/// refresh gate.
///
/// # Example
///
/// ```ignore
/// let session = Session::restore(store)?;
/// let client = ApiClient::new(ClientConfig::new("http://localhost:8000"), session)?;
/// let me = client.me().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
    /// Serializes refresh calls so concurrent 401s trigger a single refresh.
    refresh_gate: Arc<Mutex<()>>,
}

impl ApiClient {
    /// Creates a client. Fails only if the HTTP client cannot be initialized.
    pub fn new(config: ClientConfig, session: Session) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
            refresh_gate: Arc::new(Mutex::new(())),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request with bearer auth and the refresh-once policy.
    ///
    /// `build` is called once per attempt. A 401 on the replay is returned
    /// as-is; no second refresh is attempted for the same call.
    pub(crate) async fn send<F>(&self, build: F) -> Result<Response>
    where
        F: Fn(&reqwest::Client) -> RequestBuilder,
    {
        let token = self.session.access_token()?;
        let response = Self::authorize(build(&self.http), token.as_deref())
            .send()
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!("[ApiClient] 401 from {}", response.url().path());
        match self.refresh_access_token(token.as_deref()).await? {
            Some(fresh) => {
                debug!("[ApiClient] Replaying request with refreshed token");
                let replay = Self::authorize(build(&self.http), Some(&fresh))
                    .send()
                    .await?;
                Ok(replay)
            }
            None => Ok(response),
        }
    }

    fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Returns the access token to replay with, or `None` when no refresh
    /// token is stored (the original 401 then stands).
    async fn refresh_access_token(&self, stale: Option<&str>) -> Result<Option<String>> {
        let _gate = self.refresh_gate.lock().await;

        // Another request may have refreshed while this one waited.
        if let Some(current) = self.session.access_token()? {
            if stale != Some(current.as_str()) {
                debug!("[ApiClient] Access token already rotated");
                return Ok(Some(current));
            }
        }

        let Some(refresh_token) = self.session.refresh_token()? else {
            debug!("[ApiClient] No refresh token stored");
            return Ok(None);
        };

        match self.request_refresh(&refresh_token).await {
            Ok(tokens) => {
                self.session
                    .rotate(&tokens.access_token, tokens.refresh_token.as_deref())?;
                info!("[ApiClient] Access token refreshed");
                Ok(Some(tokens.access_token))
            }
            Err(err) => {
                warn!("[ApiClient] Token refresh failed: {}", err);
                self.session.expire()?;
                Err(ClientError::SessionExpired)
            }
        }
    }

    /// Bare refresh call: no bearer header and no retry.
    async fn request_refresh(&self, refresh_token: &str) -> Result<RefreshTokenResponse> {
        let response = self
            .http
            .post(self.url(REFRESH_PATH))
            .json(&RefreshTokenRequest {
                refresh_token: refresh_token.to_string(),
            })
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Parses a response body, mapping non-success statuses to errors.
    pub(crate) async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(error_from_response(status.as_u16(), &body));
        }

        // Empty bodies (204, bare 200) decode as JSON null, which `()` accepts.
        let body = if body.trim().is_empty() { "null" } else { &body };
        serde_json::from_str(body).map_err(|e| {
            ClientError::Decode(format!(
                "{} - {}",
                e,
                body.chars().take(200).collect::<String>()
            ))
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Request helpers
    // ─────────────────────────────────────────────────────────────────────────

    pub(crate) async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        debug!("[ApiClient] {} {}", method, url);

        let response = self
            .send(|http| {
                let request = http.request(method.clone(), &url);
                match body {
                    Some(body) => request.json(body),
                    None => request,
                }
            })
            .await?;
        Self::parse_response(response).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path);
        debug!("[ApiClient] GET {}", url);

        let response = self.send(|http| http.get(&url).query(query)).await?;
        Self::parse_response(response).await
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<T, ()>(Method::POST, path, None).await
    }

    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub(crate) async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<T, ()>(Method::PATCH, path, None).await
    }

    /// Uploads one file as the `file` part of a multipart form.
    pub(crate) async fn post_file<T: DeserializeOwned>(
        &self,
        path: &str,
        file_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<T> {
        let url = self.url(path);
        debug!("[ApiClient] POST {} (multipart, {} bytes)", url, data.len());

        // The form is consumed by send, so each attempt builds its own.
        let response = self
            .send(|http| {
                let part = reqwest::multipart::Part::bytes(data.to_vec())
                    .file_name(file_name.to_string());
                let part = match part.mime_str(content_type) {
                    Ok(part) => part,
                    Err(_) => reqwest::multipart::Part::bytes(data.to_vec())
                        .file_name(file_name.to_string()),
                };
                http.post(&url)
                    .multipart(reqwest::multipart::Form::new().part("file", part))
            })
            .await?;
        Self::parse_response(response).await
    }
}
