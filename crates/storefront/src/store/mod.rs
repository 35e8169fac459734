//! Entity stores.
//!
//! An [`EntityStore`] mediates between views and one remote collection. It
//! holds the last fetched collection, a "current" slot for detail views, the
//! selected identifier, an error slot and in-flight flags, and publishes
//! every change through a `tokio::sync::watch` channel.
//!
//! # Consistency
//!
//! The collection is the last successful server response adjusted by local
//! mutations applied since: creates are prepended, updates replace in place,
//! deletes remove. Nothing is reconciled with the server afterwards, so
//! callers re-fetch to confirm. Status-changing order actions (cancel,
//! return) never touch the local copy.
//!
//! # Errors
//!
//! No operation returns an error. A 401/403 is rendered as an empty result;
//! every other failure lands in an error slot (`error` for the collection,
//! `current_error` for the detail record) and is announced
//! through the [`Notifier`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shopfront_client::{api::ApiClient, notify::TracingNotifier, store::{AddressStore, SelectionFile}};
//!
//! let store = AddressStore::new(ApiClient::new(&config)?, Arc::new(TracingNotifier))
//!     .with_selection_file(SelectionFile::new(&config.state_path));
//!
//! let addresses = store.initialize().await;
//! store.select(addresses[0].id.clone());
//! ```

mod orders;
mod selection;
mod state;

pub use selection::{PersistError, PersistedSelection, SELECTION_SCHEMA_VERSION, SelectionFile};
pub use state::{Operation, StoreState};

use std::sync::Arc;

use shopfront_core::Entity;
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::api::{Addresses, ApiClient, ApiResponse, IdOf, Orders, Resource};
use crate::error::ApiError;
use crate::notify::{Notice, Notifier};

/// Store for the customer's address book.
pub type AddressStore = EntityStore<Addresses>;

/// Store for the customer's orders.
pub type OrderStore = EntityStore<Orders>;

/// State container for one remote collection.
pub struct EntityStore<R: Resource> {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    selection: Option<SelectionFile>,
    state: watch::Sender<StoreState<R::Record>>,
}

impl<R: Resource> std::fmt::Debug for EntityStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStore")
            .field("resource", &R::PLURAL)
            .field("client", &self.client)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

/// Marks an operation in flight until dropped.
///
/// Dropping the future of a running operation clears its flag too.
struct InFlight<'a, E: Entity> {
    state: &'a watch::Sender<StoreState<E>>,
    op: Operation,
}

impl<E: Entity> Drop for InFlight<'_, E> {
    fn drop(&mut self) {
        let op = self.op;
        self.state.send_modify(|s| s.finish(op));
    }
}

impl<R: Resource> EntityStore<R> {
    /// Create an empty store.
    #[must_use]
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self {
            client,
            notifier,
            selection: None,
            state,
        }
    }

    /// Persist the selection in `file`.
    #[must_use]
    pub fn with_selection_file(mut self, file: SelectionFile) -> Self {
        self.selection = Some(file);
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle & Observation
    // ─────────────────────────────────────────────────────────────────────────

    /// Reset, restore the persisted selection, then fetch the collection.
    pub async fn initialize(&self) -> Vec<R::Record> {
        self.reset();
        if let Some(id) = self.load_selection() {
            self.state.send_modify(|s| s.set_selected(Some(id)));
        }
        self.fetch_all().await
    }

    /// Drop all in-memory state. The persisted selection is left alone.
    pub fn reset(&self) {
        self.state.send_modify(|s| *s = StoreState::default());
    }

    /// Clone of the current state.
    #[must_use]
    pub fn snapshot(&self) -> StoreState<R::Record> {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StoreState<R::Record>> {
        self.state.subscribe()
    }

    /// Clone of the collection.
    #[must_use]
    pub fn items(&self) -> Vec<R::Record> {
        self.state.borrow().items().to_vec()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────────

    /// The selected identifier, if any.
    #[must_use]
    pub fn selected(&self) -> Option<IdOf<R>> {
        self.state.borrow().selected().cloned()
    }

    /// Mark `id` as selected and persist it.
    ///
    /// The id is not checked against the collection; a stale id is dropped
    /// by the next successful fetch.
    pub fn select(&self, id: IdOf<R>) {
        self.persist_selection(Some(id.as_ref()));
        self.state.send_modify(|s| s.set_selected(Some(id)));
    }

    /// Clear the selection and persist that.
    pub fn clear_selection(&self) {
        self.persist_selection(None);
        self.state.send_modify(|s| s.set_selected(None));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Fetching
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the collection with the server's.
    ///
    /// On a 401/403 the collection is emptied without an error. On any other
    /// failure the previous collection is kept and the error slot is set.
    /// Returns the collection as it stands afterwards.
    #[instrument(skip(self), fields(resource = R::PLURAL))]
    pub async fn fetch_all(&self) -> Vec<R::Record> {
        let _busy = self.track(Operation::FetchAll);

        let result = self
            .client
            .get::<Vec<R::Record>>(&R::list_path())
            .await
            .and_then(ApiResponse::into_data);

        match result {
            Ok(items) => {
                debug!(count = items.len(), "fetched {}", R::PLURAL);
                let mut selection_dropped = false;
                self.state.send_modify(|s| {
                    selection_dropped = s.replace_items(items);
                    s.clear_error();
                });
                if selection_dropped {
                    debug!("selected {} no longer exists", R::SINGULAR);
                    self.persist_selection(None);
                    self.notifier.notify(Notice::info(format!(
                        "The selected {} is no longer available.",
                        R::SINGULAR
                    )));
                }
            }
            Err(err) if err.is_auth_failure() => {
                debug!(error = %err, "not authorized; showing no {}", R::PLURAL);
                self.state.send_modify(|s| {
                    s.clear_items();
                    s.clear_error();
                });
            }
            Err(err) => {
                let message = self.fetch_failed(&err);
                self.state.send_modify(|s| s.set_error(message));
            }
        }

        self.items()
    }

    /// Load one record into the current slot.
    ///
    /// Failures land in [`StoreState::current_error`]; the collection and its
    /// error are left alone.
    #[instrument(skip(self, id), fields(resource = R::PLURAL, id = %id))]
    pub async fn fetch_one(&self, id: &IdOf<R>) -> Option<R::Record> {
        let _busy = self.track(Operation::FetchOne);

        let result = self
            .client
            .get::<R::Record>(&R::get_path(id))
            .await
            .and_then(ApiResponse::into_data);

        match result {
            Ok(record) => {
                self.state.send_modify(|s| {
                    s.set_current(Some(record.clone()));
                    s.clear_current_error();
                });
                Some(record)
            }
            Err(err) if err.is_auth_failure() => {
                debug!(error = %err, "not authorized; no current {}", R::SINGULAR);
                self.state.send_modify(|s| {
                    s.set_current(None);
                    s.clear_current_error();
                });
                None
            }
            Err(err) => {
                let message = self.fetch_failed(&err);
                self.state.send_modify(|s| {
                    s.set_current(None);
                    s.set_current_error(message);
                });
                None
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a record and insert the server's copy at the head of the collection.
    #[instrument(skip(self, payload), fields(resource = R::PLURAL))]
    pub async fn create(&self, payload: &R::Create) -> Option<R::Record> {
        let _busy = self.track(Operation::Create);

        let result = self
            .client
            .post::<_, R::Record>(&R::create_path(), payload)
            .await
            .and_then(ApiResponse::into_parts);

        match result {
            Ok((record, message)) => {
                debug!(id = %record.id(), "created {}", R::SINGULAR);
                self.state.send_modify(|s| s.prepend(record.clone()));
                self.report_success(message, "created");
                Some(record)
            }
            Err(err) => {
                self.report_failure("create", &err);
                None
            }
        }
    }

    /// Update a record and replace the local copy (collection and current slot).
    #[instrument(skip(self, id, payload), fields(resource = R::PLURAL, id = %id))]
    pub async fn update(&self, id: &IdOf<R>, payload: &R::Update) -> Option<R::Record> {
        let _busy = self.track(Operation::Update);

        let result = self
            .client
            .put::<_, R::Record>(&R::update_path(id), payload)
            .await
            .and_then(ApiResponse::into_parts);

        match result {
            Ok((record, message)) => {
                let mut found = false;
                self.state
                    .send_modify(|s| found = s.replace(id, record.clone()));
                if !found {
                    debug!("updated {} is not in the local collection", R::SINGULAR);
                }
                self.report_success(message, "updated");
                Some(record)
            }
            Err(err) => {
                self.report_failure("update", &err);
                None
            }
        }
    }

    /// Delete a record and drop it from the collection, current slot and selection.
    #[instrument(skip(self, id), fields(resource = R::PLURAL, id = %id))]
    pub async fn remove(&self, id: &IdOf<R>) -> bool {
        let _busy = self.track(Operation::Remove);

        match self
            .client
            .delete::<serde_json::Value>(&R::delete_path(id))
            .await
        {
            Ok(response) => {
                let mut selection_dropped = false;
                self.state
                    .send_modify(|s| selection_dropped = s.remove(id));
                if selection_dropped {
                    self.persist_selection(None);
                }
                self.report_success(response.message, "deleted");
                true
            }
            Err(err) => {
                self.report_failure("delete", &err);
                false
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn track(&self, op: Operation) -> InFlight<'_, R::Record> {
        self.state.send_modify(|s| s.begin(op));
        InFlight {
            state: &self.state,
            op,
        }
    }

    /// Log and announce a fetch failure, returning the message for the error slot.
    fn fetch_failed(&self, err: &ApiError) -> String {
        warn!(error = %err, status = ?err.status(), "failed to fetch {}", R::PLURAL);
        let message = err.user_message();
        self.notifier.notify(Notice::error(message.clone()));
        message
    }

    fn report_success(&self, message: Option<String>, past_tense: &str) {
        let text = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("{} {past_tense}", R::LABEL));
        self.notifier.notify(Notice::success(text));
    }

    fn report_failure(&self, action: &str, err: &ApiError) {
        if err.is_auth_failure() {
            debug!(error = %err, "{action} {} rejected: not authorized", R::SINGULAR);
            self.notifier.notify(Notice::warning(format!(
                "Please sign in to manage your {}.",
                R::PLURAL
            )));
        } else {
            warn!(error = %err, "failed to {action} {}", R::SINGULAR);
            self.notifier.notify(Notice::error(err.user_message()));
        }
    }

    fn load_selection(&self) -> Option<IdOf<R>> {
        let file = self.selection.as_ref()?;
        match file.load() {
            Ok(id) => id.map(Into::into),
            Err(err) => {
                warn!(error = %err, path = %file.path().display(), "ignoring selection file");
                None
            }
        }
    }

    fn persist_selection(&self, selected: Option<&str>) {
        if let Some(file) = &self.selection
            && let Err(err) = file.save(selected)
        {
            warn!(error = %err, "failed to persist selection");
        }
    }
}
