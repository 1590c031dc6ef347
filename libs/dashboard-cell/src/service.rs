// libs/dashboard-cell/src/service.rs
use std::sync::Arc;

use chrono::NaiveDateTime;
use futures::join;
use tracing::{debug, warn};

use appointment_cell::models::AppointmentStatus;
use appointment_cell::services::gateway::AppointmentApi;
use customer_cell::services::gateway::CustomerGateway;
use dentist_cell::services::gateway::DentistGateway;

use crate::models::DashboardSummary;

/// Dentists are counted from the first page of this size.
const DENTIST_PAGE_SIZE: i64 = 100;
const UPCOMING_LIMIT: usize = 5;

pub struct DashboardService {
    customers: Arc<CustomerGateway>,
    dentists: Arc<DentistGateway>,
    appointments: Arc<dyn AppointmentApi>,
}

impl DashboardService {
    pub fn new(
        customers: Arc<CustomerGateway>,
        dentists: Arc<DentistGateway>,
        appointments: Arc<dyn AppointmentApi>,
    ) -> Self {
        Self {
            customers,
            dentists,
            appointments,
        }
    }

    /// Aggregate load for the dashboard cards.
    ///
    /// The three list fetches are issued concurrently and the summary
    /// resolves once all three have. There is no partial-success handling:
    /// if any fetch fails the whole summary falls back to its zero state,
    /// and the cards render empty until the next load.
    pub async fn load_summary(&self, now: NaiveDateTime) -> DashboardSummary {
        let (customers, dentists, appointments) = join!(
            self.customers.list(1, 1, ""),
            self.dentists.list(1, DENTIST_PAGE_SIZE, ""),
            self.appointments.list(None),
        );

        let (customers, dentists, appointments) = match (customers, dentists, appointments) {
            (Ok(customers), Ok(dentists), Ok(appointments)) => {
                (customers, dentists, appointments)
            }
            _ => {
                warn!("Dashboard aggregate load failed, falling back to empty summary");
                return DashboardSummary::default();
            }
        };

        let active_dentist_count = dentists.items.iter().filter(|d| d.is_active).count();

        let todays_appointment_count = appointments
            .iter()
            .filter(|a| {
                a.status == AppointmentStatus::Scheduled
                    && a.appointment_date_time.date() == now.date()
            })
            .count();

        let mut upcoming: Vec<_> = appointments
            .into_iter()
            .filter(|a| {
                a.status == AppointmentStatus::Scheduled && a.appointment_date_time > now
            })
            .collect();
        upcoming.sort_by_key(|a| a.appointment_date_time);
        upcoming.truncate(UPCOMING_LIMIT);

        debug!(
            "Dashboard summary: {} customers, {} active dentists, {} appointments today",
            customers.total_count, active_dentist_count, todays_appointment_count
        );

        DashboardSummary {
            customer_count: customers.total_count,
            active_dentist_count,
            todays_appointment_count,
            upcoming,
        }
    }
}
