// libs/customer-cell/src/services/store.rs
use std::sync::{Arc, RwLock};

use tracing::info;

use crate::models::{Customer, CustomerListState, CustomerRequest};
use crate::services::gateway::CustomerGateway;

const LOCK_MSG: &str = "customer state lock poisoned";

/// In-memory cache of one page of customers for the management view.
/// Same loading/error discipline as the appointment store.
pub struct CustomerStore {
    gateway: Arc<CustomerGateway>,
    state: RwLock<CustomerListState>,
}

impl CustomerStore {
    pub fn new(gateway: Arc<CustomerGateway>) -> Self {
        Self {
            gateway,
            state: RwLock::new(CustomerListState::default()),
        }
    }

    pub fn snapshot(&self) -> CustomerListState {
        self.state.read().expect(LOCK_MSG).clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().expect(LOCK_MSG).error.clone()
    }

    pub fn total_pages(&self, page_size: i64) -> i64 {
        if page_size <= 0 {
            return 0;
        }
        let total = self.state.read().expect(LOCK_MSG).total_count;
        (total + page_size - 1) / page_size
    }

    pub async fn fetch(&self, page: i64, page_size: i64, search: &str) -> Option<Vec<Customer>> {
        self.begin();

        match self.gateway.list(page, page_size, search).await {
            Ok(paged) => {
                self.finish(|state| {
                    state.customers = paged.items.clone();
                    state.total_count = paged.total_count;
                });
                Some(paged.items)
            }
            Err(err) => {
                self.fail(err.to_string());
                None
            }
        }
    }

    pub async fn create(&self, request: &CustomerRequest) -> Option<Customer> {
        self.begin();

        match self.gateway.create(request).await {
            Ok(created) => {
                info!("Customer {} created", created.id);
                self.finish(|state| {
                    state.customers.insert(0, created.clone());
                    state.total_count += 1;
                });
                Some(created)
            }
            Err(err) => {
                self.fail(err.to_string());
                None
            }
        }
    }

    pub async fn update(&self, id: i64, request: &CustomerRequest) -> Option<Customer> {
        self.begin();

        match self.gateway.update(id, request).await {
            Ok(updated) => {
                self.finish(|state| {
                    if let Some(slot) = state.customers.iter_mut().find(|c| c.id == updated.id) {
                        *slot = updated.clone();
                    }
                });
                Some(updated)
            }
            Err(err) => {
                self.fail(err.to_string());
                None
            }
        }
    }

    pub async fn delete(&self, id: i64) -> bool {
        self.begin();

        match self.gateway.delete(id).await {
            Ok(()) => {
                info!("Customer {} deleted", id);
                self.finish(|state| {
                    let before = state.customers.len();
                    state.customers.retain(|c| c.id != id);
                    if state.customers.len() < before {
                        state.total_count -= 1;
                    }
                });
                true
            }
            Err(err) => {
                self.fail(err.to_string());
                false
            }
        }
    }

    fn begin(&self) {
        let mut state = self.state.write().expect(LOCK_MSG);
        state.loading = true;
        state.error = None;
    }

    fn finish(&self, apply: impl FnOnce(&mut CustomerListState)) {
        let mut state = self.state.write().expect(LOCK_MSG);
        state.loading = false;
        apply(&mut state);
    }

    fn fail(&self, message: String) {
        let mut state = self.state.write().expect(LOCK_MSG);
        state.loading = false;
        state.error = Some(message);
    }
}
