// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Optimistic mutation protocol between the in-memory expense cache and the
//! remote store. Local apply always happens before the remote request; a
//! failed remote mutation is rolled back locally and reported to the caller.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use chrono::Utc;
use log::warn;

use crate::models::{Expense, ExpenseDraft, ExpenseRow};
use crate::store::{ExpenseStore, StoreError};

static LOCAL_ID_SEQ: AtomicU64 = AtomicU64::new(0);

/// Temporary identifier for an optimistic record, unique within the process.
/// Replaced by the server-assigned id on reconciliation.
pub fn next_local_id() -> String {
    format!(
        "local-{}-{}",
        Utc::now().timestamp_millis(),
        LOCAL_ID_SEQ.fetch_add(1, Ordering::Relaxed)
    )
}

/// Process-wide working set of the authenticated user's expenses. Owned for
/// the lifetime of a session, discarded on logout, repopulated from the
/// remote store on load.
#[derive(Debug, Default)]
pub struct ExpenseCache {
    items: Vec<Expense>,
}

impl ExpenseCache {
    pub fn items(&self) -> &[Expense] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|e| e.id == id)
    }

    fn replace_all(&mut self, items: Vec<Expense>) {
        self.items = items;
    }

    fn prepend(&mut self, expense: Expense) {
        self.items.insert(0, expense);
    }

    fn remove(&mut self, id: &str) -> Option<Expense> {
        let pos = self.items.iter().position(|e| e.id == id)?;
        Some(self.items.remove(pos))
    }
}

pub struct SyncClient<S: ExpenseStore> {
    store: S,
    cache: ExpenseCache,
}

impl<S: ExpenseStore> SyncClient<S> {
    pub fn new(store: S) -> Self {
        SyncClient {
            store,
            cache: ExpenseCache::default(),
        }
    }

    pub fn expenses(&self) -> &[Expense] {
        self.cache.items()
    }

    pub fn cache(&self) -> &ExpenseCache {
        &self.cache
    }

    /// Replace the entire cache with the remote store's rows (server-ordered
    /// by date descending). Returns the number of records loaded.
    pub fn load(&mut self) -> Result<usize, StoreError> {
        let rows = self.store.fetch_all()?;
        self.cache
            .replace_all(rows.into_iter().map(|r| r.into_expense()).collect());
        Ok(self.cache.len())
    }

    /// Record a new expense: optimistic local apply, remote insert,
    /// reconciliation. The local apply always happens before the remote
    /// request is issued.
    pub fn add(&mut self, draft: ExpenseDraft) -> Result<Expense, StoreError> {
        let temp_id = self.apply_add(&draft);
        let result = self.store.insert(&draft);
        self.reconcile_add(&temp_id, result)
    }

    /// Step 1+2 of the add protocol: build the candidate record with a
    /// temporary id and current timestamp, and insert it at the front of
    /// the cache so consumers see it before any network round-trip.
    pub fn apply_add(&mut self, draft: &ExpenseDraft) -> String {
        let temp_id = next_local_id();
        self.cache.prepend(Expense {
            id: temp_id.clone(),
            amount: draft.amount,
            category: draft.category,
            date: draft.date,
            note: draft.note.clone(),
            created_at: Utc::now().timestamp_millis(),
        });
        temp_id
    }

    /// Step 4/5: resolve the optimistic record against the remote outcome.
    /// On success the temporary record is dropped and the server's row takes
    /// its place, so exactly one record represents the expense. If the
    /// optimistic record was deleted while the insert was in flight, the
    /// server row is not re-inserted and a compensating remote delete is
    /// issued instead of resurrecting it. On failure the optimistic insert
    /// is rolled back and the error returned.
    pub fn reconcile_add(
        &mut self,
        temp_id: &str,
        result: Result<ExpenseRow, StoreError>,
    ) -> Result<Expense, StoreError> {
        match result {
            Ok(row) => {
                let confirmed = row.into_expense();
                if self.cache.remove(temp_id).is_some() {
                    self.cache.prepend(confirmed.clone());
                } else if let Err(err) = self.store.delete(&confirmed.id) {
                    warn!(
                        "expense {} deleted during reconciliation; remote cleanup failed: {}",
                        confirmed.id, err
                    );
                }
                Ok(confirmed)
            }
            Err(err) => {
                self.cache.remove(temp_id);
                Err(err)
            }
        }
    }

    /// Optimistically remove an expense by id, then delete it remotely. An
    /// id absent from the cache is a local no-op but the remote delete is
    /// still issued. On remote failure the removed record is restored.
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let removed = self.cache.remove(id);
        match self.store.delete(id) {
            Ok(()) => Ok(()),
            Err(err) => {
                if let Some(expense) = removed {
                    self.cache.prepend(expense);
                }
                Err(err)
            }
        }
    }
}

/// Background reachability probe against the remote store. Exposes an
/// online/offline flag for the UI; it never gates mutations, which are
/// attempted regardless and simply fail while offline.
pub struct ConnectionMonitor {
    online: Arc<AtomicBool>,
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl ConnectionMonitor {
    pub const PROBE_INTERVAL: Duration = Duration::from_secs(30);

    pub fn start<S>(store: S) -> Self
    where
        S: ExpenseStore + Send + 'static,
    {
        Self::start_with_interval(store, Self::PROBE_INTERVAL)
    }

    pub fn start_with_interval<S>(store: S, interval: Duration) -> Self
    where
        S: ExpenseStore + Send + 'static,
    {
        let online = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&online);
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = std::thread::spawn(move || loop {
            flag.store(store.probe(), Ordering::Relaxed);
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => continue,
                _ => break,
            }
        });
        ConnectionMonitor {
            online,
            stop_tx,
            handle: Some(handle),
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }

    /// Cancel the probe and wait for the thread to finish. Also runs on
    /// drop, so the timer cannot outlive the session that started it.
    pub fn stop(&mut self) {
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ConnectionMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}
