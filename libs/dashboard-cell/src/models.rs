// libs/dashboard-cell/src/models.rs
use appointment_cell::models::Appointment;

/// One load's worth of dashboard cards. Everything here is derived; the
/// zero value is also the fallback when the aggregate load fails.
#[derive(Debug, Clone, Default)]
pub struct DashboardSummary {
    pub customer_count: i64,
    pub active_dentist_count: usize,
    pub todays_appointment_count: usize,
    /// Soonest first; the only client-side re-sort in the console.
    pub upcoming: Vec<Appointment>,
}
