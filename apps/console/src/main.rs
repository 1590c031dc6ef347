use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use appointment_cell::services::gateway::{AppointmentApi, AppointmentGateway};
use appointment_cell::services::store::AppointmentStore;
use auth_cell::gateway::AuthGateway;
use customer_cell::services::gateway::CustomerGateway;
use dashboard_cell::service::DashboardService;
use dentist_cell::services::gateway::DentistGateway;
use shared_config::AppConfig;
use shared_models::auth::{LoginRequest, SessionContext};
use shared_transport::ApiTransport;

#[tokio::main]
async fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting NiceDentist management console");

    // Load configuration and wire the shared session into both transports
    let config = AppConfig::from_env();
    let timeout = Duration::from_secs(config.request_timeout_secs);

    let session = Arc::new(SessionContext::new());
    let auth_transport = Arc::new(ApiTransport::new(
        config.auth_api_url.clone(),
        timeout,
        Arc::clone(&session),
    )?);
    let manager_transport = Arc::new(ApiTransport::new(
        config.manager_api_url.clone(),
        timeout,
        Arc::clone(&session),
    )?);

    // Authenticate against the auth service
    let auth = AuthGateway::new(auth_transport);
    let email = std::env::var("CONSOLE_EMAIL").context("CONSOLE_EMAIL not set")?;
    let password = std::env::var("CONSOLE_PASSWORD").context("CONSOLE_PASSWORD not set")?;
    auth.login(&LoginRequest { email, password })
        .await
        .context("login failed")?;

    // Dashboard aggregate load
    let appointments: Arc<dyn AppointmentApi> =
        Arc::new(AppointmentGateway::new(Arc::clone(&manager_transport)));
    let dashboard = DashboardService::new(
        Arc::new(CustomerGateway::new(Arc::clone(&manager_transport))),
        Arc::new(DentistGateway::new(Arc::clone(&manager_transport))),
        Arc::clone(&appointments),
    );

    let now = chrono::Local::now().naive_local();
    let summary = dashboard.load_summary(now).await;
    info!("{} registered customers", summary.customer_count);
    info!("{} active dentists", summary.active_dentist_count);
    info!(
        "{} appointments scheduled today",
        summary.todays_appointment_count
    );
    for appointment in &summary.upcoming {
        info!(
            "Upcoming: {} - {} with {} ({})",
            appointment.appointment_date_time,
            appointment.customer_name,
            appointment.dentist_name,
            appointment.procedure_type
        );
    }

    // The appointment list view's initial mount: one store, one fetch
    let store = AppointmentStore::new(appointments);
    store.fetch(None).await;
    match store.error() {
        Some(error) => warn!("Appointment list failed to load: {}", error),
        None => info!(
            "Appointment list loaded with {} entries",
            store.appointments().len()
        ),
    }

    Ok(())
}
