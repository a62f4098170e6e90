//! In-memory checklist store.
//!
//! # Responsibility
//! - Hold the authoritative `Collection` snapshot for one process.
//! - Apply list/item operations and announce every new snapshot.
//!
//! # Invariants
//! - The store is the single writer; readers only ever see whole snapshots.
//! - Observers are notified after every accepted operation, including no-ops.
//! - Rejected operations leave the snapshot untouched and notify nobody.

use crate::model::checklist::{Collection, ItemId, ListId, ValidationError};
use log::debug;
use std::sync::Arc;

pub mod derive;
pub mod ops;

pub use derive::{progress_percent, CollectionSummary, ItemPartition, ListProgress};

/// Receives each snapshot the store commits.
///
/// Implementations must return quickly; slow work belongs on another thread.
pub trait SnapshotObserver: Send + Sync {
    fn snapshot_changed(&self, snapshot: &Arc<Collection>);
}

/// Single-writer owner of the current collection snapshot.
#[derive(Default)]
pub struct ChecklistStore {
    snapshot: Arc<Collection>,
    observers: Vec<Arc<dyn SnapshotObserver>>,
}

impl ChecklistStore {
    /// Creates an empty store with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current snapshot. Cheap; shares the underlying value.
    pub fn snapshot(&self) -> Arc<Collection> {
        Arc::clone(&self.snapshot)
    }

    pub fn subscribe(&mut self, observer: Arc<dyn SnapshotObserver>) {
        self.observers.push(observer);
    }

    /// Replaces the snapshot with a loaded value without notifying observers.
    pub fn hydrate(&mut self, collection: Collection) {
        self.snapshot = Arc::new(collection);
    }

    /// Creates a list and returns its id.
    pub fn create_list(&mut self, title: &str) -> Result<ListId, ValidationError> {
        let next = ops::create_list(&self.snapshot, title)?;
        let list_id = next
            .lists
            .last()
            .map(|list| list.id.clone())
            .unwrap_or_default();
        self.commit("create_list", next);
        Ok(list_id)
    }

    pub fn delete_list(&mut self, list_id: &str) {
        let next = ops::delete_list(&self.snapshot, list_id);
        self.commit("delete_list", next);
    }

    /// Adds an item and returns its id, or `None` when the list is unknown.
    pub fn add_item(
        &mut self,
        list_id: &str,
        name: &str,
    ) -> Result<Option<ItemId>, ValidationError> {
        let next = ops::add_item(&self.snapshot, list_id, name)?;
        let item_id = if self.snapshot.contains_list(list_id) {
            next.list(list_id)
                .and_then(|list| list.items.last())
                .map(|item| item.id.clone())
        } else {
            None
        };
        self.commit("add_item", next);
        Ok(item_id)
    }

    pub fn toggle_item(&mut self, list_id: &str, item_id: &str) {
        let next = ops::toggle_item(&self.snapshot, list_id, item_id);
        self.commit("toggle_item", next);
    }

    pub fn delete_item(&mut self, list_id: &str, item_id: &str) {
        let next = ops::delete_item(&self.snapshot, list_id, item_id);
        self.commit("delete_item", next);
    }

    fn commit(&mut self, operation: &'static str, next: Collection) {
        let summary = next.summary();
        self.snapshot = Arc::new(next);
        debug!(
            "event=store_commit module=store status=ok op={} lists={} items={} observers={}",
            operation,
            summary.list_count,
            summary.item_count,
            self.observers.len()
        );
        for observer in &self.observers {
            observer.snapshot_changed(&self.snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChecklistStore, SnapshotObserver};
    use crate::model::checklist::{Collection, ValidationError};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<Arc<Collection>>>,
    }

    impl SnapshotObserver for Recorder {
        fn snapshot_changed(&self, snapshot: &Arc<Collection>) {
            self.seen
                .lock()
                .expect("recorder lock")
                .push(Arc::clone(snapshot));
        }
    }

    #[test]
    fn observers_see_every_accepted_snapshot() {
        let recorder = Arc::new(Recorder::default());
        let mut store = ChecklistStore::new();
        store.subscribe(recorder.clone());

        let list_id = store.create_list("Groceries").expect("valid title");
        store.add_item(&list_id, "Milk").expect("valid name");
        store.delete_list("nonexistent");

        let seen = recorder.seen.lock().expect("recorder lock");
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[2], store.snapshot());
    }

    #[test]
    fn rejected_operations_do_not_notify() {
        let recorder = Arc::new(Recorder::default());
        let mut store = ChecklistStore::new();
        store.subscribe(recorder.clone());

        assert_eq!(
            store.create_list("  ").expect_err("blank title"),
            ValidationError::EmptyListTitle
        );
        assert!(store.snapshot().is_empty());
        assert!(recorder.seen.lock().expect("recorder lock").is_empty());
    }

    #[test]
    fn earlier_snapshots_stay_unchanged() {
        let mut store = ChecklistStore::new();
        let list_id = store.create_list("Groceries").expect("valid title");
        let before = store.snapshot();

        store.add_item(&list_id, "Milk").expect("valid name");

        assert!(before.lists[0].items.is_empty());
        assert_eq!(store.snapshot().lists[0].items.len(), 1);
    }

    #[test]
    fn add_item_to_unknown_list_returns_none() {
        let mut store = ChecklistStore::new();
        assert_eq!(store.add_item("list-missing", "Milk").expect("valid name"), None);
    }
}
