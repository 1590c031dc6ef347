// libs/customer-cell/src/models.rs
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub address: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
}

/// Paged customer list plus loading/error state for the management view.
#[derive(Debug, Clone, Default)]
pub struct CustomerListState {
    pub customers: Vec<Customer>,
    pub total_count: i64,
    pub loading: bool,
    pub error: Option<String>,
}
