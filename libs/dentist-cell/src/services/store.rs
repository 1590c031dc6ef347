// libs/dentist-cell/src/services/store.rs
use std::sync::{Arc, RwLock};

use tracing::info;

use crate::models::{Dentist, DentistListState, DentistRequest};
use crate::services::gateway::DentistGateway;

const LOCK_MSG: &str = "dentist state lock poisoned";

pub struct DentistStore {
    gateway: Arc<DentistGateway>,
    state: RwLock<DentistListState>,
}

impl DentistStore {
    pub fn new(gateway: Arc<DentistGateway>) -> Self {
        Self {
            gateway,
            state: RwLock::new(DentistListState::default()),
        }
    }

    pub fn snapshot(&self) -> DentistListState {
        self.state.read().expect(LOCK_MSG).clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().expect(LOCK_MSG).error.clone()
    }

    pub async fn fetch(&self, page: i64, page_size: i64, search: &str) -> Option<Vec<Dentist>> {
        self.begin();

        match self.gateway.list(page, page_size, search).await {
            Ok(paged) => {
                self.finish(|state| {
                    state.dentists = paged.items.clone();
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

    pub async fn create(&self, request: &DentistRequest) -> Option<Dentist> {
        self.begin();

        match self.gateway.create(request).await {
            Ok(created) => {
                info!("Dentist {} registered", created.id);
                self.finish(|state| {
                    state.dentists.insert(0, created.clone());
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

    pub async fn update(&self, id: i64, request: &DentistRequest) -> Option<Dentist> {
        self.begin();

        match self.gateway.update(id, request).await {
            Ok(updated) => {
                self.finish(|state| {
                    if let Some(slot) = state.dentists.iter_mut().find(|d| d.id == updated.id) {
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

    /// Soft activation toggle: full update with `is_active` flipped.
    pub async fn set_active(&self, dentist: &Dentist, active: bool) -> Option<Dentist> {
        let mut request = DentistRequest::from_dentist(dentist);
        request.is_active = active;
        self.update(dentist.id, &request).await
    }

    fn begin(&self) {
        let mut state = self.state.write().expect(LOCK_MSG);
        state.loading = true;
        state.error = None;
    }

    fn finish(&self, apply: impl FnOnce(&mut DentistListState)) {
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
