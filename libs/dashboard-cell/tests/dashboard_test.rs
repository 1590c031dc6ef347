use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, NaiveDateTime, Utc};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::services::gateway::AppointmentGateway;
use customer_cell::services::gateway::CustomerGateway;
use dashboard_cell::service::DashboardService;
use dentist_cell::services::gateway::DentistGateway;
use shared_models::auth::{Session, SessionContext, User, UserRole};
use shared_transport::ApiTransport;
use shared_utils::test_utils::MockManagerResponses;

fn manager_session() -> Session {
    Session {
        token: "test-token".to_string(),
        user: User {
            id: 1,
            email: "manager@nicedentist.com".to_string(),
            name: "Test Manager".to_string(),
            role: UserRole::Manager,
        },
    }
}

fn service_for(server: &MockServer) -> DashboardService {
    let session = Arc::new(SessionContext::with_session(manager_session()));
    let transport = Arc::new(
        ApiTransport::new(server.uri(), StdDuration::from_secs(5), session)
            .expect("transport should build"),
    );
    DashboardService::new(
        Arc::new(CustomerGateway::new(Arc::clone(&transport))),
        Arc::new(DentistGateway::new(Arc::clone(&transport))),
        Arc::new(AppointmentGateway::new(transport)),
    )
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

async fn mount_customers(server: &MockServer, total: i64) {
    Mock::given(method("GET"))
        .and(path("/api/customers"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockManagerResponses::paged(vec![], total)),
        )
        .mount(server)
        .await;
}

async fn mount_dentists(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/dentists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockManagerResponses::paged(
            vec![
                MockManagerResponses::dentist(1, "Dr. Carlos Oliveira", "Ortodontia", true),
                MockManagerResponses::dentist(2, "Dra. Fernanda Lima", "Endodontia", false),
            ],
            2,
        )))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_summary_aggregates_all_three_slices() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);
    let now = now();

    mount_customers(&mock_server, 42).await;
    mount_dentists(&mock_server).await;

    // Two future appointments out of order, one in the past, one cancelled.
    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockManagerResponses::appointment_at(1, 2, 3, "Scheduled", now + Duration::days(3)),
            MockManagerResponses::appointment_at(2, 2, 3, "Scheduled", now + Duration::days(1)),
            MockManagerResponses::appointment_at(3, 2, 3, "Scheduled", now - Duration::days(1)),
            MockManagerResponses::appointment_at(4, 2, 3, "Cancelled", now + Duration::days(2)),
        ])))
        .mount(&mock_server)
        .await;

    let summary = service.load_summary(now).await;

    assert_eq!(summary.customer_count, 42);
    assert_eq!(summary.active_dentist_count, 1);
    let upcoming_ids: Vec<i64> = summary.upcoming.iter().map(|a| a.id).collect();
    assert_eq!(upcoming_ids, vec![2, 1], "soonest first, scheduled only");
}

#[tokio::test]
async fn test_any_failed_slice_zeroes_the_summary() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);
    let now = now();

    mount_customers(&mock_server, 42).await;
    Mock::given(method("GET"))
        .and(path("/api/dentists"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "manager api down"})),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockManagerResponses::appointment_at(1, 2, 3, "Scheduled", now + Duration::days(1)),
        ])))
        .mount(&mock_server)
        .await;

    let summary = service.load_summary(now).await;

    assert_eq!(summary.customer_count, 0);
    assert_eq!(summary.active_dentist_count, 0);
    assert_eq!(summary.todays_appointment_count, 0);
    assert!(summary.upcoming.is_empty());
}
