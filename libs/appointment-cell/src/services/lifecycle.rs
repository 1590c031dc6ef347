// libs/appointment-cell/src/services/lifecycle.rs
use tracing::{debug, warn};

use crate::models::{AppointmentError, AppointmentStatus};

/// Guarded transition table for the appointment status machine.
///
/// The remote service historically accepted any status-to-status update;
/// this guard is the client-side enforcement point, so an illegal request
/// never leaves the process.
pub struct AppointmentLifecycleService;

impl AppointmentLifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// Validate that a status transition is allowed.
    pub fn validate_transition(
        &self,
        current: &AppointmentStatus,
        requested: &AppointmentStatus,
    ) -> Result<(), AppointmentError> {
        debug!("Validating status transition from {} to {}", current, requested);

        if !self.valid_transitions(current).contains(requested) {
            warn!("Invalid status transition attempted: {} -> {}", current, requested);
            return Err(AppointmentError::InvalidStatusTransition {
                from: *current,
                to: *requested,
            });
        }

        Ok(())
    }

    /// All legal next statuses for a given current status.
    pub fn valid_transitions(&self, current: &AppointmentStatus) -> Vec<AppointmentStatus> {
        match current {
            AppointmentStatus::Scheduled => vec![
                AppointmentStatus::Completed,
                AppointmentStatus::Cancelled,
                AppointmentStatus::CancellationRequested,
            ],
            AppointmentStatus::CancellationRequested => vec![
                AppointmentStatus::Cancelled,
                AppointmentStatus::Scheduled,
            ],
            // Terminal states - no transitions allowed
            AppointmentStatus::Completed => vec![],
            AppointmentStatus::Cancelled => vec![],
        }
    }
}

impl Default for AppointmentLifecycleService {
    fn default() -> Self {
        Self::new()
    }
}
