// libs/appointment-cell/src/services/store.rs
use std::sync::{Arc, RwLock};

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::models::{
    Appointment, AppointmentFilters, AppointmentListState, AppointmentStatus,
    CreateAppointmentRequest, UpdateAppointmentRequest,
};
use crate::services::gateway::AppointmentApi;
use crate::services::lifecycle::AppointmentLifecycleService;
use crate::services::schedule;

const LOCK_MSG: &str = "appointment state lock poisoned";

/// Source of "now" for scheduling validation. Injected so tests can pin it.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// In-memory cache of the appointment list for one mounted view.
///
/// Every operation sets the shared `loading` flag for its duration, clears
/// the previous `error`, and reconciles the collection from the remote
/// response before returning. The state lock is never held across an await,
/// so overlapping operations interleave at the await points only; when two
/// mutations race, the collection reflects whichever response resolved last
/// (documented last-writer-wins).
pub struct AppointmentStore {
    api: Arc<dyn AppointmentApi>,
    lifecycle: AppointmentLifecycleService,
    clock: Arc<dyn Clock>,
    state: RwLock<AppointmentListState>,
}

impl AppointmentStore {
    pub fn new(api: Arc<dyn AppointmentApi>) -> Self {
        Self::with_clock(api, Arc::new(SystemClock))
    }

    pub fn with_clock(api: Arc<dyn AppointmentApi>, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            lifecycle: AppointmentLifecycleService::new(),
            clock,
            state: RwLock::new(AppointmentListState::default()),
        }
    }

    // --- view-facing state accessors -------------------------------------

    pub fn snapshot(&self) -> AppointmentListState {
        self.state.read().expect(LOCK_MSG).clone()
    }

    pub fn appointments(&self) -> Vec<Appointment> {
        self.state.read().expect(LOCK_MSG).appointments.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().expect(LOCK_MSG).loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().expect(LOCK_MSG).error.clone()
    }

    // --- operations ------------------------------------------------------

    /// Replace the whole local collection with the server's response. No
    /// client-side merge; on failure the collection is left as it was.
    pub async fn fetch(
        &self,
        filters: Option<&AppointmentFilters>,
    ) -> Option<Vec<Appointment>> {
        self.begin();

        match self.api.list(filters).await {
            Ok(appointments) => {
                debug!("Fetched {} appointments", appointments.len());
                self.finish(|state| state.appointments = appointments.clone());
                Some(appointments)
            }
            Err(err) => {
                self.fail(err.to_string());
                None
            }
        }
    }

    /// Create and prepend: the new appointment goes to the front of the
    /// local collection regardless of server ordering.
    pub async fn create(&self, request: &CreateAppointmentRequest) -> Option<Appointment> {
        if let Err(err) = schedule::validate_schedule(request.appointment_date_time, self.clock.now())
        {
            // Validator failures never reach the gateway.
            warn!("Rejected appointment create: {}", err);
            self.fail(err.to_string());
            return None;
        }

        self.begin();

        match self.api.create(request).await {
            Ok(created) => {
                info!("Appointment {} created", created.id);
                self.finish(|state| state.appointments.insert(0, created.clone()));
                Some(created)
            }
            Err(err) => {
                self.fail(err.to_string());
                None
            }
        }
    }

    /// Full replace of the mutable fields; the matching cached entry is
    /// swapped in place, preserving collection order.
    pub async fn update(&self, request: &UpdateAppointmentRequest) -> Option<Appointment> {
        if let Err(err) = schedule::validate_schedule(request.appointment_date_time, self.clock.now())
        {
            warn!("Rejected appointment update: {}", err);
            self.fail(err.to_string());
            return None;
        }

        self.begin();

        match self.api.update(request).await {
            Ok(updated) => {
                self.finish(|state| replace_entry(state, updated.clone()));
                Some(updated)
            }
            Err(err) => {
                self.fail(err.to_string());
                None
            }
        }
    }

    /// Move an appointment through the status machine. The transition is
    /// guarded against the cached record when we have one; an id we have
    /// never seen is left to the server's verdict.
    pub async fn update_status(&self, id: i64, status: AppointmentStatus) -> bool {
        if !self.guard_transition(id, status) {
            return false;
        }

        self.begin();

        match self.api.update_status(id, status).await {
            Ok(updated) => {
                // Server is authoritative for the resulting record.
                self.finish(|state| replace_entry(state, updated.clone()));
                true
            }
            Err(err) => {
                self.fail(err.to_string());
                false
            }
        }
    }

    pub async fn cancel(&self, id: i64, reason: Option<String>) -> bool {
        if !self.guard_transition(id, AppointmentStatus::Cancelled) {
            return false;
        }

        self.begin();

        match self.api.cancel(id, reason).await {
            Ok(updated) => {
                self.finish(|state| replace_entry(state, updated.clone()));
                true
            }
            Err(err) => {
                self.fail(err.to_string());
                false
            }
        }
    }

    pub async fn complete(&self, id: i64, notes: Option<String>) -> bool {
        if !self.guard_transition(id, AppointmentStatus::Completed) {
            return false;
        }

        self.begin();

        match self.api.complete(id, notes).await {
            Ok(updated) => {
                self.finish(|state| replace_entry(state, updated.clone()));
                true
            }
            Err(err) => {
                self.fail(err.to_string());
                false
            }
        }
    }

    /// Lower-privilege cancellation path: flags the appointment for an
    /// operator to approve or reject later.
    pub async fn request_cancellation(&self, id: i64) -> bool {
        self.update_status(id, AppointmentStatus::CancellationRequested).await
    }

    /// Hard delete. On success the entry is dropped from the collection;
    /// on failure it stays.
    pub async fn delete(&self, id: i64) -> bool {
        self.begin();

        match self.api.delete(id).await {
            Ok(()) => {
                info!("Appointment {} deleted", id);
                self.finish(|state| state.appointments.retain(|a| a.id != id));
                true
            }
            Err(err) => {
                self.fail(err.to_string());
                false
            }
        }
    }

    // --- internals -------------------------------------------------------

    fn guard_transition(&self, id: i64, requested: AppointmentStatus) -> bool {
        let current = self
            .state
            .read()
            .expect(LOCK_MSG)
            .appointments
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.status);

        if let Some(current) = current {
            if let Err(err) = self.lifecycle.validate_transition(&current, &requested) {
                self.fail(err.to_string());
                return false;
            }
        }

        true
    }

    fn begin(&self) {
        let mut state = self.state.write().expect(LOCK_MSG);
        state.loading = true;
        state.error = None;
    }

    fn finish(&self, apply: impl FnOnce(&mut AppointmentListState)) {
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

fn replace_entry(state: &mut AppointmentListState, updated: Appointment) {
    if let Some(slot) = state.appointments.iter_mut().find(|a| a.id == updated.id) {
        *slot = updated;
    }
}
