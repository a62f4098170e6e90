//! Hydrate/persist bridge between the store and the snapshot slot.
//!
//! # Responsibility
//! - Load the last saved snapshot once at startup.
//! - Forward every committed snapshot to the background writer.
//!
//! # Invariants
//! - Phase only moves forward: `Uninitialized -> Hydrating -> Ready`.
//! - Read failures and malformed payloads hydrate as an empty collection.
//! - Persist failures never reach the caller and never touch memory state.

use crate::config::CoreConfig;
use crate::model::checklist::Collection;
use crate::repo::kv_repo::KeyValueStore;
use crate::store::SnapshotObserver;
use crate::sync::codec::decode_collection;
use crate::sync::writer::{SnapshotWriter, WriterStats};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

pub type SyncResult<T> = Result<T, SyncError>;

/// Lifecycle of one sync instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Uninitialized,
    Hydrating,
    Ready,
}

#[derive(Debug)]
pub enum SyncError {
    /// `hydrate` was called more than once.
    AlreadyHydrated,
    /// A snapshot arrived before hydration finished.
    NotReady(SyncPhase),
    /// The writer thread could not be started.
    WriterSpawn(io::Error),
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyHydrated => write!(f, "snapshot slot already hydrated"),
            Self::NotReady(phase) => write!(f, "persistence not ready (phase {phase:?})"),
            Self::WriterSpawn(err) => write!(f, "failed to start snapshot writer: {err}"),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::WriterSpawn(err) => Some(err),
            Self::AlreadyHydrated | Self::NotReady(_) => None,
        }
    }
}

/// One-way bridge from the in-memory store to the persisted slot.
pub struct PersistenceSync {
    kv: Arc<dyn KeyValueStore>,
    storage_key: String,
    phase: Mutex<SyncPhase>,
    writer: SnapshotWriter,
}

impl PersistenceSync {
    /// Creates an un-hydrated sync and starts its writer thread.
    pub fn new(kv: Arc<dyn KeyValueStore>, config: &CoreConfig) -> SyncResult<Self> {
        let writer = SnapshotWriter::spawn(
            Arc::clone(&kv),
            config.storage_key.clone(),
            config.writer_thread_name.clone(),
        )
        .map_err(SyncError::WriterSpawn)?;

        Ok(Self {
            kv,
            storage_key: config.storage_key.clone(),
            phase: Mutex::new(SyncPhase::Uninitialized),
            writer,
        })
    }

    pub fn phase(&self) -> SyncPhase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reads the slot once and returns the collection to start from.
    ///
    /// Absent, unreadable and malformed slots all yield an empty collection;
    /// the last two are logged.
    ///
    /// # Errors
    /// - `AlreadyHydrated` when called after the first hydration began.
    pub fn hydrate(&self) -> SyncResult<Collection> {
        {
            let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
            if *phase != SyncPhase::Uninitialized {
                return Err(SyncError::AlreadyHydrated);
            }
            *phase = SyncPhase::Hydrating;
        }

        let collection = self.load_slot();
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner) = SyncPhase::Ready;
        Ok(collection)
    }

    /// Hands `snapshot` to the background writer and returns immediately.
    ///
    /// # Errors
    /// - `NotReady` before hydration completed.
    pub fn persist(&self, snapshot: Arc<Collection>) -> SyncResult<()> {
        match self.phase() {
            SyncPhase::Ready => {
                self.writer.submit(snapshot);
                Ok(())
            }
            phase => Err(SyncError::NotReady(phase)),
        }
    }

    /// Waits until every submitted snapshot has been written or abandoned.
    pub fn flush(&self) {
        self.writer.flush();
    }

    pub fn writer_stats(&self) -> WriterStats {
        self.writer.stats()
    }

    fn load_slot(&self) -> Collection {
        let started_at = Instant::now();
        let raw = match self.kv.get(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("event=hydrate module=sync status=empty reason=slot_absent");
                return Collection::default();
            }
            Err(err) => {
                error!(
                    "event=hydrate module=sync status=error error_code=slot_read_failed error={}",
                    err
                );
                return Collection::default();
            }
        };

        match decode_collection(&raw) {
            Ok(collection) => {
                let summary = collection.summary();
                info!(
                    "event=hydrate module=sync status=ok lists={} items={} duration_ms={}",
                    summary.list_count,
                    summary.item_count,
                    started_at.elapsed().as_millis()
                );
                collection
            }
            Err(err) => {
                warn!(
                    "event=hydrate module=sync status=error error_code=slot_malformed bytes={} error={}",
                    raw.len(),
                    err
                );
                Collection::default()
            }
        }
    }
}

impl SnapshotObserver for PersistenceSync {
    fn snapshot_changed(&self, snapshot: &Arc<Collection>) {
        if let Err(err) = self.persist(Arc::clone(snapshot)) {
            warn!(
                "event=persist module=sync status=skipped error_code=not_ready error={}",
                err
            );
        }
    }
}
