// ── Sync cycle ──
//
// One skip-or-fetch, classify, commit pass for one resource type:
//
//   Idle → SkipCheck → Skipped
//                    → Requesting → CommitSuccess
//                                 → Classify → Suppressed (offline)
//                                            → CommitFailureAndReport
//
// Nothing escapes a cycle. Every failure is committed to the record and,
// unless the gateway is offline, reported through the sink.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use bridgewatch_api::BridgetClient;

use crate::error::{FailureClass, SyncFailure};
use crate::notify::{Notification, NotificationSink};
use crate::resource::Resource;
use crate::store::{InFlightGuard, SyncState};

/// Why a cycle did not issue a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Already warmed and no force refresh requested.
    Warm,
    /// A previous cycle for the same type is still waiting on the network.
    InFlight,
}

/// Terminal state of a sync cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Skipped(SkipReason),
    /// Fresh items committed.
    Updated { count: usize },
    /// Gateway offline: record cleared, nothing reported.
    Suppressed,
    /// Any other failure: record cleared, one notification pushed.
    Reported,
}

/// Everything a cycle needs, cheap to clone into scheduled tasks.
#[derive(Clone)]
pub struct SyncContext {
    pub state: Arc<SyncState>,
    pub client: Arc<BridgetClient>,
    pub sink: Arc<dyn NotificationSink>,
    /// Service tag stamped on notifications.
    pub service: Arc<str>,
}

impl SyncContext {
    pub fn new(
        state: Arc<SyncState>,
        client: Arc<BridgetClient>,
        sink: Arc<dyn NotificationSink>,
        service: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            state,
            client,
            sink,
            service: service.into(),
        }
    }
}

/// Run one sync cycle for `R`.
pub async fn run_cycle<R: Resource>(ctx: &SyncContext) -> CycleOutcome {
    let resource = R::KIND;
    let store = R::store(&ctx.state);

    if store.is_warmed() && !ctx.state.force_refresh() {
        trace!(%resource, "cache warm, skipping");
        return CycleOutcome::Skipped(SkipReason::Warm);
    }

    let Some(guard) = store.try_begin() else {
        debug!(%resource, "previous request still in flight, dropping tick");
        return CycleOutcome::Skipped(SkipReason::InFlight);
    };

    run_guarded::<R>(ctx, guard).await
}

/// The part of a cycle that runs while holding the in-flight guard.
async fn run_guarded<R: Resource>(
    ctx: &SyncContext,
    guard: InFlightGuard<'_, R::Item>,
) -> CycleOutcome {
    let resource = R::KIND;
    let store = guard.store();

    // Another cycle may have committed between the first check and the guard.
    if store.is_warmed() && !ctx.state.force_refresh() {
        trace!(%resource, "cache warmed while acquiring guard, skipping");
        return CycleOutcome::Skipped(SkipReason::Warm);
    }

    store.mark_updating();
    let result = ctx.client.get_list::<R::Item>(resource.path()).await;

    match result {
        Ok(items) => {
            let count = items.len();
            store.commit_success(items);
            debug!(%resource, count, "committed fresh items");
            CycleOutcome::Updated { count }
        }
        Err(err) => {
            let failure = SyncFailure::from_error(&err);
            let class = failure.kind.class();
            store.commit_failure(failure);

            match class {
                FailureClass::Offline => {
                    debug!(%resource, error = %err, "backend offline, not reporting");
                    CycleOutcome::Suppressed
                }
                FailureClass::Other => {
                    warn!(%resource, error = %err, "fetch failed");
                    ctx.sink
                        .push(Notification::fetch_failed(&ctx.service, resource, &err));
                    CycleOutcome::Reported
                }
            }
        }
    }
}
