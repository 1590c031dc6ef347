// libs/auth-cell/src/gateway.rs
use std::sync::Arc;

use reqwest::Method;
use tracing::{debug, info};

use shared_models::auth::{AuthResponse, LoginRequest, RegisterRequest, Session, SessionContext, User};
use shared_models::error::ApiError;
use shared_transport::ApiTransport;

/// Client for the authentication service. The only writer of the shared
/// session besides the transport's 401 interceptor.
pub struct AuthGateway {
    transport: Arc<ApiTransport>,
    session: Arc<SessionContext>,
}

impl AuthGateway {
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        let session = transport.session();
        Self { transport, session }
    }

    /// Authenticate and persist the session for every subsequent request.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        debug!("Logging in {}", request.email);

        let body = serde_json::to_value(request).map_err(|e| ApiError::Transport(e.to_string()))?;

        let response: AuthResponse = self
            .transport
            .request(Method::POST, "/api/auth/login", &[], Some(body))
            .await?;

        info!("Authenticated as {}", response.user.email);
        self.session.set(Session {
            token: response.token.clone(),
            user: response.user.clone(),
        });

        Ok(response)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        debug!("Registering account for {}", request.email);

        let body = serde_json::to_value(request).map_err(|e| ApiError::Transport(e.to_string()))?;

        self.transport
            .request(Method::POST, "/api/auth/register", &[], Some(body))
            .await
    }

    /// Local-only: drops the stored session. The remote service keeps no
    /// server-side session to invalidate.
    pub fn logout(&self) {
        info!("Logging out, clearing stored session");
        self.session.clear();
    }
}
