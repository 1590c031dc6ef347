use chrono::{Datelike, Duration, NaiveDateTime, Utc, Weekday};
use serde_json::{json, Value};

/// Canned manager-API response bodies shared by the wiremock test suites.
pub struct MockManagerResponses;

impl MockManagerResponses {
    pub fn appointment(id: i64, customer_id: i64, dentist_id: i64, status: &str) -> Value {
        Self::appointment_at(id, customer_id, dentist_id, status, Self::next_weekday_morning())
    }

    pub fn appointment_at(
        id: i64,
        customer_id: i64,
        dentist_id: i64,
        status: &str,
        date_time: NaiveDateTime,
    ) -> Value {
        json!({
            "id": id,
            "customerId": customer_id,
            "customerName": "Maria Silva",
            "dentistId": dentist_id,
            "dentistName": "Dr. Carlos Oliveira",
            "appointmentDateTime": date_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "procedureType": "Cleaning",
            "notes": null,
            "status": status,
            "createdAt": "2025-01-10T09:00:00",
            "updatedAt": "2025-01-10T09:00:00"
        })
    }

    pub fn customer(id: i64, name: &str, email: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "email": email,
            "phone": "+353 85 123 4567",
            "dateOfBirth": "1990-05-01",
            "address": "12 Main Street",
            "createdAt": "2025-01-10T09:00:00",
            "updatedAt": "2025-01-10T09:00:00",
            "isActive": true
        })
    }

    pub fn dentist(id: i64, name: &str, specialization: &str, is_active: bool) -> Value {
        json!({
            "id": id,
            "name": name,
            "email": "dentist@nicedentist.com",
            "phone": "+353 85 765 4321",
            "licenseNumber": format!("DEN-{:05}", id),
            "specialization": specialization,
            "createdAt": "2025-01-10T09:00:00",
            "updatedAt": "2025-01-10T09:00:00",
            "isActive": is_active
        })
    }

    pub fn paged(items: Vec<Value>, total_count: i64) -> Value {
        json!({
            "items": items,
            "totalCount": total_count
        })
    }

    /// A schedule-valid instant: next weekday at 10:00 local, at least a day
    /// out, so validator-facing tests never trip the weekend or past rules.
    pub fn next_weekday_morning() -> NaiveDateTime {
        let mut candidate = (Utc::now() + Duration::days(1)).date_naive();
        while matches!(candidate.weekday(), Weekday::Sat | Weekday::Sun) {
            candidate += Duration::days(1);
        }
        candidate.and_hms_opt(10, 0, 0).expect("valid time")
    }
}
