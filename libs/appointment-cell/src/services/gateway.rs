// libs/appointment-cell/src/services/gateway.rs
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use tracing::debug;

use shared_models::error::ApiError;
use shared_transport::ApiTransport;

use crate::models::{
    Appointment, AppointmentError, AppointmentFilters, AppointmentStatus,
    CreateAppointmentRequest, UpdateAppointmentRequest,
};

/// Remote operations of the manager API's appointment routes.
///
/// The store depends on this trait rather than the concrete gateway, so
/// tests can substitute a fake without standing up a server.
#[async_trait]
pub trait AppointmentApi: Send + Sync {
    async fn list(
        &self,
        filters: Option<&AppointmentFilters>,
    ) -> Result<Vec<Appointment>, AppointmentError>;

    async fn get_by_id(&self, id: i64) -> Result<Appointment, AppointmentError>;

    async fn get_by_customer(&self, customer_id: i64)
        -> Result<Vec<Appointment>, AppointmentError>;

    async fn get_by_dentist(&self, dentist_id: i64)
        -> Result<Vec<Appointment>, AppointmentError>;

    async fn create(
        &self,
        request: &CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError>;

    async fn update(
        &self,
        request: &UpdateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError>;

    /// The sole path that changes status.
    async fn update_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError>;

    async fn cancel(
        &self,
        id: i64,
        reason: Option<String>,
    ) -> Result<Appointment, AppointmentError>;

    async fn complete(
        &self,
        id: i64,
        notes: Option<String>,
    ) -> Result<Appointment, AppointmentError>;

    async fn delete(&self, id: i64) -> Result<(), AppointmentError>;
}

/// Stateless typed client for the appointment routes. Owns no state beyond
/// the injected transport; the remote service is the sole durable owner of
/// appointment records.
pub struct AppointmentGateway {
    transport: Arc<ApiTransport>,
}

impl AppointmentGateway {
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }
}

fn map_api_error(err: ApiError) -> AppointmentError {
    match err {
        ApiError::NotFound(_) => AppointmentError::NotFound,
        other => AppointmentError::Api(other),
    }
}

#[async_trait]
impl AppointmentApi for AppointmentGateway {
    async fn list(
        &self,
        filters: Option<&AppointmentFilters>,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let query = filters.map(AppointmentFilters::to_query).unwrap_or_default();
        debug!("Listing appointments with {} filter(s)", query.len());

        self.transport
            .request(Method::GET, "/appointments", &query, None)
            .await
            .map_err(map_api_error)
    }

    async fn get_by_id(&self, id: i64) -> Result<Appointment, AppointmentError> {
        self.transport
            .request(Method::GET, &format!("/appointments/{}", id), &[], None)
            .await
            .map_err(map_api_error)
    }

    async fn get_by_customer(
        &self,
        customer_id: i64,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        self.transport
            .request(
                Method::GET,
                &format!("/appointments/customer/{}", customer_id),
                &[],
                None,
            )
            .await
            .map_err(map_api_error)
    }

    async fn get_by_dentist(
        &self,
        dentist_id: i64,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        self.transport
            .request(
                Method::GET,
                &format!("/appointments/dentist/{}", dentist_id),
                &[],
                None,
            )
            .await
            .map_err(map_api_error)
    }

    async fn create(
        &self,
        request: &CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!(
            "Creating appointment for customer {} with dentist {}",
            request.customer_id, request.dentist_id
        );

        let body = serde_json::to_value(request)
            .map_err(|e| AppointmentError::Api(ApiError::Transport(e.to_string())))?;

        self.transport
            .request(Method::POST, "/appointments", &[], Some(body))
            .await
            .map_err(map_api_error)
    }

    async fn update(
        &self,
        request: &UpdateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Updating appointment {}", request.id);

        let body = serde_json::to_value(request)
            .map_err(|e| AppointmentError::Api(ApiError::Transport(e.to_string())))?;

        self.transport
            .request(
                Method::PUT,
                &format!("/appointments/{}", request.id),
                &[],
                Some(body),
            )
            .await
            .map_err(map_api_error)
    }

    async fn update_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Setting appointment {} status to {}", id, status);

        self.transport
            .request(
                Method::PUT,
                &format!("/appointments/{}/status", id),
                &[],
                Some(json!({ "status": status })),
            )
            .await
            .map_err(map_api_error)
    }

    async fn cancel(
        &self,
        id: i64,
        reason: Option<String>,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Cancelling appointment {}", id);

        // An absent reason stays null on the wire; "no reason given" and
        // "empty reason given" are different facts.
        self.transport
            .request(
                Method::PUT,
                &format!("/appointments/{}/cancel", id),
                &[],
                Some(json!({ "reason": reason })),
            )
            .await
            .map_err(map_api_error)
    }

    async fn complete(
        &self,
        id: i64,
        notes: Option<String>,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Completing appointment {}", id);

        self.transport
            .request(
                Method::PUT,
                &format!("/appointments/{}/complete", id),
                &[],
                Some(json!({ "notes": notes })),
            )
            .await
            .map_err(map_api_error)
    }

    async fn delete(&self, id: i64) -> Result<(), AppointmentError> {
        debug!("Deleting appointment {}", id);

        self.transport
            .request_unit(Method::DELETE, &format!("/appointments/{}", id), &[], None)
            .await
            .map_err(map_api_error)
    }
}
