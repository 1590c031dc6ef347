use std::sync::Arc;
use std::time::Duration;

use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Method, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};

use shared_models::auth::SessionContext;
use shared_models::error::ApiError;

/// Bearer-token JSON transport for one remote base URL.
///
/// Construct one per remote service (auth API, manager API) with the shared
/// `SessionContext`; the session is the only mutable state this layer
/// touches. A 401 from anywhere clears the session before the error
/// surfaces, so an expired token can never keep masquerading as a field
/// error upstream.
pub struct ApiTransport {
    client: Client,
    base_url: String,
    session: Arc<SessionContext>,
}

impl ApiTransport {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session: Arc<SessionContext>,
    ) -> Result<Self, ApiError> {
        // Timeout on the client so no call can leave a caller suspended
        // forever; timeouts surface as ApiError::Transport.
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Arc<SessionContext> {
        Arc::clone(&self.session)
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.session.token() {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, value);
            }
        }

        headers
    }

    /// Send a request and decode the JSON response body.
    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(method, path, query, body).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to decode response: {}", e)))
    }

    /// Send a request whose success response carries no body (DELETE).
    pub async fn request_unit(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<(), ApiError> {
        self.send(method, path, query, body).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut req = self.client.request(method, &url).headers(self.headers());

        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await.map_err(|e| {
            error!("Request to {} failed: {}", url, e);
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = extract_server_message(&error_text);
            error!("API error ({}): {}", status, message);

            if status == StatusCode::UNAUTHORIZED {
                warn!("Session rejected by remote service, clearing stored credentials");
                self.session.clear();
            }

            return Err(ApiError::from_status(status.as_u16(), message));
        }

        Ok(response)
    }
}

/// Prefer the server's `message`/`error` JSON field over the raw body text.
fn extract_server_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(Value::as_str) {
                return text.to_string();
            }
        }
    }

    if body.is_empty() {
        "API Error".to_string()
    } else {
        body.to_string()
    }
}
