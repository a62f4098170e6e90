//! Core domain logic for the checklist app.
//! This crate owns the list/item model, its store and its persisted snapshot.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod sync;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::checklist::{
    Checklist, ChecklistItem, Collection, ItemId, ListId, ValidationError,
};
pub use repo::kv_repo::{
    InMemoryKeyValueStore, KeyValueStore, KvError, KvResult, SqliteKeyValueStore,
};
pub use service::checklist_service::{ChecklistService, ServiceError, ServiceResult};
pub use service::navigation::Screen;
pub use store::{
    ChecklistStore, CollectionSummary, ItemPartition, ListProgress, SnapshotObserver,
};
pub use sync::codec::{decode_collection, encode_collection};
pub use sync::persistence::{PersistenceSync, SyncError, SyncPhase, SyncResult};
pub use sync::writer::WriterStats;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
