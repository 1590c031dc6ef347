// libs/dentist-cell/src/models.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dentist {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    pub specialization: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub is_active: bool,
}

/// Mutable fields of a dentist record. Deactivation goes through the same
/// update path with `is_active=false`; there is no dentist delete route.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DentistRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    pub specialization: String,
    pub is_active: bool,
}

impl DentistRequest {
    /// The update body for toggling activation while leaving everything
    /// else as the record has it.
    pub fn from_dentist(dentist: &Dentist) -> Self {
        Self {
            name: dentist.name.clone(),
            email: dentist.email.clone(),
            phone: dentist.phone.clone(),
            license_number: dentist.license_number.clone(),
            specialization: dentist.specialization.clone(),
            is_active: dentist.is_active,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DentistListState {
    pub dentists: Vec<Dentist>,
    pub total_count: i64,
    pub loading: bool,
    pub error: Option<String>,
}
