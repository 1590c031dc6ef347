use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Datelike, Duration, NaiveDateTime, Weekday};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::models::{AppointmentStatus, CreateAppointmentRequest};
use appointment_cell::services::gateway::AppointmentGateway;
use appointment_cell::services::store::{AppointmentStore, Clock};
use shared_models::auth::{Session, SessionContext, User, UserRole};
use shared_transport::ApiTransport;
use shared_utils::test_utils::MockManagerResponses;

struct FixedClock(NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

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

fn store_for(server: &MockServer, now: NaiveDateTime) -> AppointmentStore {
    let session = Arc::new(SessionContext::with_session(manager_session()));
    let transport = Arc::new(
        ApiTransport::new(server.uri(), StdDuration::from_secs(5), session)
            .expect("transport should build"),
    );
    AppointmentStore::with_clock(
        Arc::new(AppointmentGateway::new(transport)),
        Arc::new(FixedClock(now)),
    )
}

fn appointment_time() -> NaiveDateTime {
    MockManagerResponses::next_weekday_morning()
}

/// A clock reading safely before the canned appointment time.
fn clock_before_appointment() -> NaiveDateTime {
    appointment_time() - Duration::hours(20)
}

fn next_saturday_after(from: NaiveDateTime) -> NaiveDateTime {
    let mut date = from.date() + Duration::days(1);
    while date.weekday() != Weekday::Sat {
        date += Duration::days(1);
    }
    date.and_hms_opt(10, 0, 0).expect("valid time")
}

fn create_request(time: NaiveDateTime) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        customer_id: 2,
        dentist_id: 3,
        appointment_date_time: time,
        procedure_type: "Cleaning".to_string(),
        notes: None,
    }
}

async fn mount_list(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_replaces_collection() {
    let mock_server = MockServer::start().await;
    let store = store_for(&mock_server, clock_before_appointment());

    mount_list(
        &mock_server,
        json!([
            MockManagerResponses::appointment(1, 2, 3, "Scheduled"),
            MockManagerResponses::appointment(2, 2, 3, "Completed"),
        ]),
    )
    .await;

    let fetched = store.fetch(None).await.expect("fetch should succeed");
    assert_eq!(fetched.len(), 2);

    let state = store.snapshot();
    assert_eq!(state.appointments.len(), 2);
    assert!(!state.loading);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn test_create_then_fetch_round_trip() {
    let mock_server = MockServer::start().await;
    let store = store_for(&mock_server, clock_before_appointment());
    let time = appointment_time();

    Mock::given(method("POST"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(
            MockManagerResponses::appointment_at(7, 2, 3, "Scheduled", time),
        ))
        .mount(&mock_server)
        .await;
    mount_list(
        &mock_server,
        json!([MockManagerResponses::appointment_at(7, 2, 3, "Scheduled", time)]),
    )
    .await;

    let created = store
        .create(&create_request(time))
        .await
        .expect("create should succeed");
    assert_eq!(created.id, 7);
    assert_eq!(created.status, AppointmentStatus::Scheduled);

    let fetched = store.fetch(None).await.expect("fetch should succeed");
    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].id, 7);
    assert_eq!(fetched[0].customer_id, 2);
    assert_eq!(fetched[0].appointment_date_time, time);
}

#[tokio::test]
async fn test_create_prepends_newest_first() {
    let mock_server = MockServer::start().await;
    let store = store_for(&mock_server, clock_before_appointment());
    let time = appointment_time();

    mount_list(
        &mock_server,
        json!([MockManagerResponses::appointment(1, 2, 3, "Scheduled")]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(
            MockManagerResponses::appointment_at(9, 2, 3, "Scheduled", time),
        ))
        .mount(&mock_server)
        .await;

    store.fetch(None).await.expect("fetch should succeed");
    store
        .create(&create_request(time))
        .await
        .expect("create should succeed");

    let appointments = store.appointments();
    assert_eq!(appointments.len(), 2);
    assert_eq!(appointments[0].id, 9, "new appointment goes to the front");
    assert_eq!(appointments[1].id, 1);
}

#[tokio::test]
async fn test_create_rejects_invalid_schedule_before_any_network_call() {
    let mock_server = MockServer::start().await;
    let now = clock_before_appointment();
    let store = store_for(&mock_server, now);

    Mock::given(method("POST"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(
            MockManagerResponses::appointment(1, 2, 3, "Scheduled"),
        ))
        .expect(0)
        .mount(&mock_server)
        .await;

    let weekend_request = create_request(next_saturday_after(now));
    let result = store.create(&weekend_request).await;

    assert_eq!(result, None);
    assert_eq!(
        store.error().as_deref(),
        Some("Appointments cannot be scheduled on weekends")
    );
    assert!(store.appointments().is_empty());
}

#[tokio::test]
async fn test_complete_replaces_with_server_record() {
    let mock_server = MockServer::start().await;
    let store = store_for(&mock_server, clock_before_appointment());

    mount_list(
        &mock_server,
        json!([MockManagerResponses::appointment(1, 2, 3, "Scheduled")]),
    )
    .await;
    Mock::given(method("PUT"))
        .and(path("/appointments/1/complete"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockManagerResponses::appointment(1, 2, 3, "Completed")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    store.fetch(None).await.expect("fetch should succeed");
    let ok = store.complete(1, Some("done".to_string())).await;

    assert!(ok);
    let state = store.snapshot();
    assert_eq!(state.appointments.len(), 1);
    assert_eq!(state.appointments[0].status, AppointmentStatus::Completed);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn test_complete_rejects_terminal_status_locally() {
    let mock_server = MockServer::start().await;
    let store = store_for(&mock_server, clock_before_appointment());

    mount_list(
        &mock_server,
        json!([MockManagerResponses::appointment(1, 2, 3, "Cancelled")]),
    )
    .await;
    Mock::given(method("PUT"))
        .and(path("/appointments/1/complete"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockManagerResponses::appointment(1, 2, 3, "Completed")),
        )
        .expect(0)
        .mount(&mock_server)
        .await;

    store.fetch(None).await.expect("fetch should succeed");
    let ok = store.complete(1, None).await;

    assert!(!ok);
    assert_eq!(
        store.error().as_deref(),
        Some("Invalid status transition from Cancelled to Completed")
    );
    assert_eq!(store.appointments()[0].status, AppointmentStatus::Cancelled);
}

#[tokio::test]
async fn test_update_status_unknown_id_surfaces_not_found() {
    let mock_server = MockServer::start().await;
    let store = store_for(&mock_server, clock_before_appointment());

    mount_list(
        &mock_server,
        json!([MockManagerResponses::appointment(1, 2, 3, "Scheduled")]),
    )
    .await;
    Mock::given(method("PUT"))
        .and(path("/appointments/999/status"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Appointment not found"})),
        )
        .mount(&mock_server)
        .await;

    store.fetch(None).await.expect("fetch should succeed");
    let ok = store.update_status(999, AppointmentStatus::Cancelled).await;

    assert!(!ok);
    assert_eq!(store.error().as_deref(), Some("Appointment not found"));
    let appointments = store.appointments();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].id, 1);
}

#[tokio::test]
async fn test_delete_twice_keeps_collection_stable() {
    let mock_server = MockServer::start().await;
    let store = store_for(&mock_server, clock_before_appointment());

    mount_list(
        &mock_server,
        json!([
            MockManagerResponses::appointment(1, 2, 3, "Scheduled"),
            MockManagerResponses::appointment(5, 2, 3, "Scheduled"),
        ]),
    )
    .await;
    // First delete succeeds; the repeat hits a server that no longer knows
    // the id.
    Mock::given(method("DELETE"))
        .and(path("/appointments/5"))
        .respond_with(ResponseTemplate::new(204))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/appointments/5"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Appointment not found"})),
        )
        .mount(&mock_server)
        .await;

    store.fetch(None).await.expect("fetch should succeed");

    assert!(store.delete(5).await);
    let after_first: Vec<i64> = store.appointments().iter().map(|a| a.id).collect();
    assert_eq!(after_first, vec![1]);

    assert!(!store.delete(5).await);
    assert_eq!(store.error().as_deref(), Some("Appointment not found"));
    let after_second: Vec<i64> = store.appointments().iter().map(|a| a.id).collect();
    assert_eq!(after_second, after_first);
}

#[tokio::test]
async fn test_concurrent_creates_both_land() {
    let mock_server = MockServer::start().await;
    let store = store_for(&mock_server, clock_before_appointment());
    let time = appointment_time();

    Mock::given(method("POST"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(
            MockManagerResponses::appointment_at(101, 2, 3, "Scheduled", time),
        ))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(
            MockManagerResponses::appointment_at(102, 4, 3, "Scheduled", time),
        ))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    let first_request = create_request(time);
    let mut second_request = create_request(time);
    second_request.customer_id = 4;

    let (first, second) = tokio::join!(
        store.create(&first_request),
        store.create(&second_request)
    );

    assert!(first.is_some());
    assert!(second.is_some());

    let mut ids: Vec<i64> = store.appointments().iter().map(|a| a.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![101, 102], "no lost update in either order");
}

#[tokio::test]
async fn test_fetch_failure_keeps_previous_collection() {
    let mock_server = MockServer::start().await;
    let store = store_for(&mock_server, clock_before_appointment());

    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockManagerResponses::appointment(1, 2, 3, "Scheduled")
        ])))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "manager api down"})),
        )
        .mount(&mock_server)
        .await;

    store.fetch(None).await.expect("first fetch should succeed");
    let second = store.fetch(None).await;

    assert_eq!(second, None);
    let state = store.snapshot();
    assert_eq!(state.appointments.len(), 1, "failed fetch does not mutate");
    assert!(!state.loading);
    assert_eq!(
        state.error.as_deref(),
        Some("API error (500): manager api down")
    );
}

#[tokio::test]
async fn test_request_cancellation_moves_to_requested() {
    let mock_server = MockServer::start().await;
    let store = store_for(&mock_server, clock_before_appointment());

    mount_list(
        &mock_server,
        json!([MockManagerResponses::appointment(1, 2, 3, "Scheduled")]),
    )
    .await;
    Mock::given(method("PUT"))
        .and(path("/appointments/1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockManagerResponses::appointment(1, 2, 3, "CancellationRequested"),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    store.fetch(None).await.expect("fetch should succeed");
    assert!(store.request_cancellation(1).await);
    assert_eq!(
        store.appointments()[0].status,
        AppointmentStatus::CancellationRequested
    );
}
