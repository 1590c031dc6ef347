// libs/dentist-cell/src/services/gateway.rs
use std::sync::Arc;

use reqwest::Method;
use tracing::debug;

use shared_models::error::ApiError;
use shared_models::paging::Paged;
use shared_transport::ApiTransport;

use crate::models::{Dentist, DentistRequest};

/// Typed client for the manager API's dentist routes.
pub struct DentistGateway {
    transport: Arc<ApiTransport>,
}

impl DentistGateway {
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }

    pub async fn list(
        &self,
        page: i64,
        page_size: i64,
        search: &str,
    ) -> Result<Paged<Dentist>, ApiError> {
        debug!("Listing dentists, page {} (search: {:?})", page, search);

        let query = [
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
            ("search", search.to_string()),
        ];

        self.transport
            .request(Method::GET, "/api/dentists", &query, None)
            .await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Dentist, ApiError> {
        self.transport
            .request(Method::GET, &format!("/api/dentists/{}", id), &[], None)
            .await
    }

    pub async fn create(&self, request: &DentistRequest) -> Result<Dentist, ApiError> {
        debug!("Registering dentist {} ({})", request.name, request.license_number);

        let body = serde_json::to_value(request).map_err(|e| ApiError::Transport(e.to_string()))?;

        self.transport
            .request(Method::POST, "/api/dentists", &[], Some(body))
            .await
    }

    pub async fn update(&self, id: i64, request: &DentistRequest) -> Result<Dentist, ApiError> {
        debug!("Updating dentist {}", id);

        let body = serde_json::to_value(request).map_err(|e| ApiError::Transport(e.to_string()))?;

        self.transport
            .request(Method::PUT, &format!("/api/dentists/{}", id), &[], Some(body))
            .await
    }
}
