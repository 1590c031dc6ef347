// libs/appointment-cell/src/models.rs
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use shared_models::error::ApiError;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub customer_id: i64,
    /// Denormalized for list rendering; not authoritative identity.
    pub customer_name: String,
    pub dentist_id: i64,
    pub dentist_name: String,
    pub appointment_date_time: NaiveDateTime,
    pub procedure_type: String,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Appointment status as the manager API spells it on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    CancellationRequested,
}

impl AppointmentStatus {
    /// Terminal statuses accept no outgoing transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "Scheduled"),
            AppointmentStatus::Completed => write!(f, "Completed"),
            AppointmentStatus::Cancelled => write!(f, "Cancelled"),
            AppointmentStatus::CancellationRequested => write!(f, "CancellationRequested"),
        }
    }
}

// ==============================================================================
// REQUEST/QUERY MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub customer_id: i64,
    pub dentist_id: i64,
    pub appointment_date_time: NaiveDateTime,
    pub procedure_type: String,
    pub notes: Option<String>,
}

/// Full replace of the mutable fields. Status is not alterable through this
/// path; the status routes are the only way to move it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentRequest {
    pub id: i64,
    pub customer_id: i64,
    pub dentist_id: i64,
    pub appointment_date_time: NaiveDateTime,
    pub procedure_type: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentFilters {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub customer_id: Option<i64>,
    pub dentist_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentFilters {
    /// Query pairs for the list route. Absent filters are omitted from the
    /// request entirely, never sent as empty or zero.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();

        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            query.push(("pageSize", page_size.to_string()));
        }
        if let Some(customer_id) = self.customer_id {
            query.push(("customerId", customer_id.to_string()));
        }
        if let Some(dentist_id) = self.dentist_id {
            query.push(("dentistId", dentist_id.to_string()));
        }
        if let Some(start_date) = self.start_date {
            query.push(("startDate", start_date.to_string()));
        }
        if let Some(end_date) = self.end_date {
            query.push(("endDate", end_date.to_string()));
        }
        if let Some(status) = &self.status {
            query.push(("status", status.to_string()));
        }

        query
    }
}

// ==============================================================================
// COLLECTION STORE STATE
// ==============================================================================

/// What a consuming view renders from: the cached collection in server
/// order, the shared loading flag, and the last operation's error.
#[derive(Debug, Clone, Default)]
pub struct AppointmentListState {
    pub appointments: Vec<Appointment>,
    pub loading: bool,
    pub error: Option<String>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

/// Client-side scheduling-validity failures. Checked before any network
/// call; one reason per validation pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("Date and time is required")]
    Required,

    #[error("Appointment must be in the future")]
    InPast,

    #[error("Appointments must be between 8:00 AM and 6:00 PM")]
    OutsideBusinessHours,

    #[error("Appointments cannot be scheduled on weekends")]
    Weekend,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("{0}")]
    InvalidSchedule(#[from] ScheduleError),

    #[error("{0}")]
    Api(#[from] ApiError),
}
