// libs/customer-cell/src/services/gateway.rs
use std::sync::Arc;

use reqwest::Method;
use tracing::debug;

use shared_models::error::ApiError;
use shared_models::paging::Paged;
use shared_transport::ApiTransport;

use crate::models::{Customer, CustomerRequest};

/// Typed client for the manager API's customer routes.
pub struct CustomerGateway {
    transport: Arc<ApiTransport>,
}

impl CustomerGateway {
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }

    /// Paged list. The list route always takes page/pageSize/search; an
    /// empty search string means "no filter" server-side.
    pub async fn list(
        &self,
        page: i64,
        page_size: i64,
        search: &str,
    ) -> Result<Paged<Customer>, ApiError> {
        debug!("Listing customers, page {} (search: {:?})", page, search);

        let query = [
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
            ("search", search.to_string()),
        ];

        self.transport
            .request(Method::GET, "/api/customers", &query, None)
            .await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Customer, ApiError> {
        self.transport
            .request(Method::GET, &format!("/api/customers/{}", id), &[], None)
            .await
    }

    pub async fn create(&self, request: &CustomerRequest) -> Result<Customer, ApiError> {
        debug!("Creating customer {}", request.email);

        let body = serde_json::to_value(request).map_err(|e| ApiError::Transport(e.to_string()))?;

        self.transport
            .request(Method::POST, "/api/customers", &[], Some(body))
            .await
    }

    pub async fn update(&self, id: i64, request: &CustomerRequest) -> Result<Customer, ApiError> {
        debug!("Updating customer {}", id);

        let body = serde_json::to_value(request).map_err(|e| ApiError::Transport(e.to_string()))?;

        self.transport
            .request(Method::PUT, &format!("/api/customers/{}", id), &[], Some(body))
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        debug!("Deleting customer {}", id);

        self.transport
            .request_unit(Method::DELETE, &format!("/api/customers/{}", id), &[], None)
            .await
    }
}
