// ── Per-type resource record ──
//
// One `watch` channel per resource type holds the whole record, so every
// mutation is a single `send_modify` and readers always see a complete
// record. An atomic flag next to it is the in-flight guard.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;

use crate::error::SyncFailure;

/// Point-in-time view of one resource type.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceRecord<T> {
    /// Last resolved payload; empty after a failed cycle.
    pub items: Arc<Vec<T>>,
    /// True strictly while a request is outstanding.
    pub updating: bool,
    /// True once a fetch has succeeded. Never reset.
    pub warmed: bool,
    pub last_error: Option<SyncFailure>,
    pub last_success: Option<DateTime<Utc>>,
}

impl<T> ResourceRecord<T> {
    /// The state a record is created in: about to fetch, nothing known yet.
    fn initial() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            updating: true,
            warmed: false,
            last_error: None,
            last_success: None,
        }
    }
}

/// Authoritative cache for a single resource type.
///
/// Mutations are meant to be issued by the holder of the [`InFlightGuard`];
/// that keeps a single writer per type without a lock around the request.
pub struct ResourceStore<T> {
    record: watch::Sender<ResourceRecord<T>>,
    in_flight: AtomicBool,
}

impl<T: Clone> ResourceStore<T> {
    pub(crate) fn new() -> Self {
        let (record, _) = watch::channel(ResourceRecord::initial());
        Self {
            record,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Consistent copy of the current record. Items are shared, not copied.
    pub fn snapshot(&self) -> ResourceRecord<T> {
        self.record.borrow().clone()
    }

    /// Subscribe to record changes.
    pub fn subscribe(&self) -> watch::Receiver<ResourceRecord<T>> {
        self.record.subscribe()
    }

    pub fn is_warmed(&self) -> bool {
        self.record.borrow().warmed
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Flag the record as having a request outstanding.
    pub fn mark_updating(&self) {
        self.record.send_modify(|r| r.updating = true);
    }

    /// Replace items with a fresh payload and mark the record warm.
    pub fn commit_success(&self, items: Vec<T>) {
        self.record.send_modify(|r| {
            r.items = Arc::new(items);
            r.updating = false;
            r.warmed = true;
            r.last_error = None;
            r.last_success = Some(Utc::now());
        });
    }

    /// Clear items after a failed fetch. `warmed` is left alone.
    pub fn commit_failure(&self, failure: SyncFailure) {
        self.record.send_modify(|r| {
            r.items = Arc::new(Vec::new());
            r.updating = false;
            r.last_error = Some(failure);
        });
    }

    /// Claim the right to run a cycle for this type.
    ///
    /// Returns `None` while another cycle holds the guard.
    pub fn try_begin(&self) -> Option<InFlightGuard<'_, T>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard { store: self })
    }
}

/// Held for the duration of one sync cycle.
///
/// Dropping it releases the guard and, if the cycle never reached a commit
/// (its future was dropped mid-request), clears `updating`.
pub struct InFlightGuard<'a, T: Clone> {
    store: &'a ResourceStore<T>,
}

impl<T: Clone> InFlightGuard<'_, T> {
    pub fn store(&self) -> &ResourceStore<T> {
        self.store
    }
}

impl<T: Clone> Drop for InFlightGuard<'_, T> {
    fn drop(&mut self) {
        self.store.record.send_if_modified(|r| {
            let was_updating = r.updating;
            r.updating = false;
            was_updating
        });
        self.store.in_flight.store(false, Ordering::Release);
    }
}
