//! Background snapshot writer.
//!
//! # Responsibility
//! - Move slot writes off the caller's thread.
//! - Coalesce bursts so only the newest pending snapshot gets written.
//!
//! # Invariants
//! - At most one write is in flight at any time.
//! - A snapshot submitted later is never overwritten by an earlier one.
//! - Dropping the writer drains the pending snapshot before joining.
//! - A panicking store call counts as a failed write; the thread keeps running.

use crate::model::checklist::Collection;
use crate::repo::kv_repo::KeyValueStore;
use crate::sync::codec::encode_collection;
use log::{debug, error};
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Counters describing writer activity since spawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Snapshots successfully stored.
    pub written: u64,
    /// Snapshots replaced by a newer one before being written.
    pub coalesced: u64,
    /// Snapshots whose encode or store call failed.
    pub failed: u64,
}

#[derive(Default)]
struct WriterState {
    pending: Option<Arc<Collection>>,
    in_flight: bool,
    shutdown: bool,
    stats: WriterStats,
}

#[derive(Default)]
struct Shared {
    state: Mutex<WriterState>,
    work_ready: Condvar,
    idle: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, WriterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Fire-and-forget writer that owns one background thread.
pub struct SnapshotWriter {
    shared: Arc<Shared>,
    handle: Option<JoinHandle<()>>,
}

impl SnapshotWriter {
    /// Starts the writer thread storing snapshots under `storage_key`.
    ///
    /// # Errors
    /// - Returns the OS error when the thread cannot be spawned.
    pub fn spawn(
        kv: Arc<dyn KeyValueStore>,
        storage_key: impl Into<String>,
        thread_name: impl Into<String>,
    ) -> io::Result<Self> {
        let shared = Arc::new(Shared::default());
        let storage_key = storage_key.into();
        let worker_shared = Arc::clone(&shared);

        let handle = thread::Builder::new()
            .name(thread_name.into())
            .spawn(move || run(&worker_shared, kv.as_ref(), &storage_key))?;

        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }

    /// Queues `snapshot`, replacing any snapshot not yet picked up.
    pub fn submit(&self, snapshot: Arc<Collection>) {
        let mut state = self.shared.lock();
        if state.pending.replace(snapshot).is_some() {
            state.stats.coalesced += 1;
        }
        self.shared.work_ready.notify_one();
    }

    /// Blocks until nothing is pending or in flight.
    pub fn flush(&self) {
        let mut state = self.shared.lock();
        while state.pending.is_some() || state.in_flight {
            state = self
                .shared
                .idle
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    pub fn stats(&self) -> WriterStats {
        self.shared.lock().stats
    }
}

impl Drop for SnapshotWriter {
    fn drop(&mut self) {
        self.shared.lock().shutdown = true;
        self.shared.work_ready.notify_all();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("event=writer_join module=sync status=error error_code=writer_panicked");
            }
        }
    }
}

fn run(shared: &Shared, kv: &dyn KeyValueStore, storage_key: &str) {
    loop {
        let snapshot = {
            let mut state = shared.lock();
            loop {
                if let Some(snapshot) = state.pending.take() {
                    state.in_flight = true;
                    break snapshot;
                }
                if state.shutdown {
                    return;
                }
                state = shared
                    .work_ready
                    .wait(state)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        };

        let stored = panic::catch_unwind(AssertUnwindSafe(|| {
            store_snapshot(kv, storage_key, &snapshot)
        }))
        .unwrap_or_else(|_| {
            error!("event=persist module=sync status=error error_code=slot_write_panicked");
            false
        });

        let mut state = shared.lock();
        state.in_flight = false;
        if stored {
            state.stats.written += 1;
        } else {
            state.stats.failed += 1;
        }
        shared.idle.notify_all();
    }
}

fn store_snapshot(kv: &dyn KeyValueStore, storage_key: &str, snapshot: &Collection) -> bool {
    let started_at = Instant::now();
    let encoded = match encode_collection(snapshot) {
        Ok(encoded) => encoded,
        Err(err) => {
            error!(
                "event=persist module=sync status=error error_code=encode_failed error={}",
                err
            );
            return false;
        }
    };

    match kv.set(storage_key, &encoded) {
        Ok(()) => {
            debug!(
                "event=persist module=sync status=ok lists={} bytes={} duration_ms={}",
                snapshot.len(),
                encoded.len(),
                started_at.elapsed().as_millis()
            );
            true
        }
        Err(err) => {
            error!(
                "event=persist module=sync status=error error_code=slot_write_failed duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            false
        }
    }
}
