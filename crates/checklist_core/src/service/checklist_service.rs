//! Checklist use-case service.
//!
//! # Responsibility
//! - Start-up ordering: open slot, hydrate, then accept mutations.
//! - Route every accepted mutation through the store so it gets persisted.
//! - Keep navigation consistent with the collection (no dangling open list).
//!
//! # Invariants
//! - A started service is always in `SyncPhase::Ready`.
//! - Validation failures leave both the collection and the slot untouched.

use crate::config::CoreConfig;
use crate::model::checklist::{Checklist, Collection, ItemId, ListId, ValidationError};
use crate::repo::kv_repo::{KeyValueStore, KvError, SqliteKeyValueStore};
use crate::service::navigation::Screen;
use crate::store::{ChecklistStore, CollectionSummary};
use crate::sync::persistence::{PersistenceSync, SyncError, SyncPhase};
use crate::sync::writer::WriterStats;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::Arc;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    Validation(ValidationError),
    ListNotFound(ListId),
    Sync(SyncError),
    Kv(KvError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::ListNotFound(list_id) => write!(f, "list not found: {list_id}"),
            Self::Sync(err) => write!(f, "{err}"),
            Self::Kv(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Sync(err) => Some(err),
            Self::Kv(err) => Some(err),
            Self::ListNotFound(_) => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<SyncError> for ServiceError {
    fn from(value: SyncError) -> Self {
        Self::Sync(value)
    }
}

impl From<KvError> for ServiceError {
    fn from(value: KvError) -> Self {
        Self::Kv(value)
    }
}

/// Top-level controller owning the store, its persistence and navigation.
pub struct ChecklistService {
    store: ChecklistStore,
    sync: Arc<PersistenceSync>,
    screen: Screen,
}

impl ChecklistService {
    /// Hydrates from `kv` and returns a service ready for mutations.
    pub fn start(kv: Arc<dyn KeyValueStore>, config: &CoreConfig) -> ServiceResult<Self> {
        let sync = Arc::new(PersistenceSync::new(kv, config)?);
        let mut store = ChecklistStore::new();
        store.hydrate(sync.hydrate()?);
        store.subscribe(sync.clone());

        info!(
            "event=service_start module=service status=ok lists={}",
            store.snapshot().len()
        );
        Ok(Self {
            store,
            sync,
            screen: Screen::Home,
        })
    }

    /// Opens the SQLite slot database at `path` and starts on top of it.
    pub fn open_sqlite(path: impl AsRef<Path>, config: &CoreConfig) -> ServiceResult<Self> {
        let kv = SqliteKeyValueStore::open(path)?;
        Self::start(Arc::new(kv), config)
    }

    pub fn phase(&self) -> SyncPhase {
        self.sync.phase()
    }

    pub fn snapshot(&self) -> Arc<Collection> {
        self.store.snapshot()
    }

    pub fn summary(&self) -> CollectionSummary {
        self.store.snapshot().summary()
    }

    pub fn list(&self, list_id: &str) -> Option<Checklist> {
        self.store.snapshot().list(list_id).cloned()
    }

    pub fn create_list(&mut self, title: &str) -> ServiceResult<ListId> {
        self.store.create_list(title).map_err(|err| {
            warn!("event=create_list module=service status=rejected reason={err}");
            ServiceError::from(err)
        })
    }

    /// Deletes a list; the caller must have confirmed with the user.
    ///
    /// Returns to Home when the deleted list was open.
    pub fn delete_list(&mut self, list_id: &str) {
        self.store.delete_list(list_id);
        if self.screen.open_list_id() == Some(list_id) {
            self.screen = Screen::Home;
        }
    }

    /// Adds an item; `Ok(None)` when `list_id` matches no list.
    pub fn add_item(&mut self, list_id: &str, name: &str) -> ServiceResult<Option<ItemId>> {
        self.store.add_item(list_id, name).map_err(|err| {
            warn!("event=add_item module=service status=rejected reason={err}");
            ServiceError::from(err)
        })
    }

    pub fn toggle_item(&mut self, list_id: &str, item_id: &str) {
        self.store.toggle_item(list_id, item_id);
    }

    pub fn delete_item(&mut self, list_id: &str, item_id: &str) {
        self.store.delete_item(list_id, item_id);
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Shows one list.
    ///
    /// # Errors
    /// - `ListNotFound` when no list has `list_id`; the screen is unchanged.
    pub fn open_list(&mut self, list_id: &str) -> ServiceResult<()> {
        if !self.store.snapshot().contains_list(list_id) {
            return Err(ServiceError::ListNotFound(list_id.to_string()));
        }
        self.screen = Screen::List(list_id.to_string());
        Ok(())
    }

    pub fn go_home(&mut self) {
        self.screen = Screen::Home;
    }

    /// The list currently shown, if any.
    pub fn current_list(&self) -> Option<Checklist> {
        self.screen.resolve(&self.store.snapshot()).cloned()
    }

    /// Blocks until every committed snapshot has reached the slot (or failed).
    pub fn flush(&self) {
        self.sync.flush();
    }

    pub fn writer_stats(&self) -> WriterStats {
        self.sync.writer_stats()
    }
}
