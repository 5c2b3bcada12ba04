//! API client for the classbook backend.
//!
//! This module provides the `ApiClient` struct, the single point of egress
//! for all backend calls. It joins paths onto the configured base URL,
//! attaches the bearer token from the session store, classifies response
//! statuses into typed outcomes, and exposes the account flows (login,
//! registration, profile) on top of the raw verbs.

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{header, Client, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::auth::SessionStore;
use crate::models::{ProfileUpdate, RegisterRequest, UserProfile};

use super::ApiError;

/// Join the configured base URL and a request path with exactly one slash.
fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Decoded success payload of an API call.
///
/// The backend answers JSON almost everywhere, but a few endpoints return
/// plain text; the content-type header decides which variant callers get.
#[derive(Debug, Clone)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Decode the JSON payload into `T`.
    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            ResponseBody::Json(value) => serde_json::from_value(value)
                .context("Response JSON did not match the expected shape"),
            ResponseBody::Text(text) => Err(ApiError::InvalidResponse(format!(
                "expected a JSON response, got text: {}",
                ApiError::truncate_body(&text)
            ))
            .into()),
        }
    }

    /// The payload as text; JSON payloads are re-serialized.
    pub fn text(self) -> String {
        match self {
            ResponseBody::Json(value) => value.to_string(),
            ResponseBody::Text(text) => text,
        }
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    #[serde(flatten)]
    user: UserProfile,
}

/// API client for the classbook backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Create a new API client against `base_url`, reading and writing the
    /// session through `session`.
    pub fn new(base_url: impl Into<String>, session: Arc<dyn SessionStore>) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            session,
        })
    }

    /// The session store this client was built with.
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    // ===== Verbs =====

    pub async fn get(&self, path: &str) -> Result<ResponseBody> {
        self.request(Method::GET, path, None, None).await
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<ResponseBody> {
        let payload = serde_json::to_string(body).context("Failed to serialize request body")?;
        self.request(Method::POST, path, Some(payload), None).await
    }

    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<ResponseBody> {
        let payload = serde_json::to_string(body).context("Failed to serialize request body")?;
        self.request(Method::PUT, path, Some(payload), None).await
    }

    pub async fn delete(&self, path: &str) -> Result<ResponseBody> {
        self.request(Method::DELETE, path, None, None).await
    }

    /// DELETE with a JSON body (the class roster endpoint takes one).
    pub async fn delete_with_body<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ResponseBody> {
        let payload = serde_json::to_string(body).context("Failed to serialize request body")?;
        self.request(Method::DELETE, path, Some(payload), None)
            .await
    }

    /// Issue a request. Every verb funnels through here: URL joining,
    /// headers, body, status classification, and the 401 side effect all
    /// happen in one place. Header `overrides` are merged last, so callers
    /// win over the defaults.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        overrides: Option<header::HeaderMap>,
    ) -> Result<ResponseBody> {
        let url = join_url(&self.base_url, path);

        let mut headers = self.request_headers()?;
        if let Some(extra) = overrides {
            headers.extend(extra);
        }

        debug!(method = %method, url = %url, "Sending API request");

        let mut request = self.client.request(method, &url).headers(headers);
        if let Some(payload) = body {
            request = request.body(payload);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "API request failed to complete");
                return Err(ApiError::Network(e).into());
            }
        };

        self.classify(response).await
    }

    fn request_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(token) = self.session.token() {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Map a response to its outcome. First match wins; a 401 drops the
    /// local session before the error reaches the caller.
    async fn classify(&self, response: Response) -> Result<ResponseBody> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            if let Err(e) = self.session.clear() {
                warn!(error = %e, "Failed to clear session after 401");
            }
            return Err(ApiError::SessionExpired.into());
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body).into());
        }

        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("application/json"))
            .unwrap_or(false);

        let text = response
            .text()
            .await
            .context("Failed to read response body")?;

        if is_json {
            // Some mutation endpoints answer 2xx with an empty body
            if text.is_empty() {
                return Ok(ResponseBody::Json(Value::Null));
            }
            let value: Value = serde_json::from_str(&text)
                .map_err(|e| ApiError::InvalidResponse(format!("malformed JSON body: {}", e)))?;
            Ok(ResponseBody::Json(value))
        } else {
            Ok(ResponseBody::Text(text))
        }
    }

    // ===== Account flows =====

    /// Sign in and persist the returned session.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile> {
        let response: LoginResponse = self
            .post("/api/auth/login", &LoginRequest { email, password })
            .await?
            .json()?;

        self.session.set_token(&response.token)?;
        self.session.set_user(&response.user)?;

        debug!(user_id = response.user.id, "Signed in");
        Ok(response.user)
    }

    /// Drop the persisted session. Safe to call when already signed out.
    pub fn logout(&self) -> Result<()> {
        self.session.clear()
    }

    /// Create an account. The caller signs in separately afterwards.
    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        self.post("/api/auth/register", request).await?;
        Ok(())
    }

    /// Fetch the signed-in user's profile from the backend.
    pub async fn profile(&self) -> Result<UserProfile> {
        self.get("/api/auth/profile").await?.json()
    }

    /// Update the profile on the backend, then write the merged result
    /// through the session store. The stored role is never touched.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        self.put("/api/auth/profile", update).await?;

        let mut user = self
            .session
            .user()
            .ok_or_else(|| anyhow::anyhow!("No signed-in user to update"))?;
        user.first_name = update.first_name.clone();
        user.last_name = update.last_name.clone();
        user.email = update.email.clone();
        self.session.set_user(&user)?;

        Ok(user)
    }
}
