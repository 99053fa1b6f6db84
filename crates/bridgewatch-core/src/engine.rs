// ── Engine facade ──
//
// Owns the sync state, the HTTP client, and the scheduler. Consumers
// start it, toggle force refresh, and read snapshots; everything else
// happens in background cycles.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;
use tracing::info;

use bridgewatch_api::{Bridge, BridgetClient, SerialPort, TransportConfig};

use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::notify::NotificationSink;
use crate::resource::{Bridges, Resource, SerialPorts};
use crate::scheduler::Scheduler;
use crate::store::{ResourceRecord, SyncState};
use crate::sync::{CycleOutcome, SyncContext, run_cycle};

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<EngineInner>`. The engine always starts
/// cold: nothing is persisted between processes.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    config: EngineConfig,
    ctx: SyncContext,
    scheduler: Mutex<Option<Scheduler>>,
    /// Parent of every scheduler's token; fires when the last handle drops.
    cancel: CancellationToken,
}

impl Drop for EngineInner {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl Engine {
    /// Build an engine from configuration. Does NOT start polling --
    /// call [`start()`](Self::start).
    pub fn new(config: EngineConfig, sink: Arc<dyn NotificationSink>) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let client = BridgetClient::new(config.base_url.clone(), &transport)?;
        Ok(Self::with_client(config, client, sink))
    }

    /// Build an engine around an existing client.
    pub fn with_client(
        config: EngineConfig,
        client: BridgetClient,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let ctx = SyncContext::new(
            Arc::new(SyncState::new()),
            Arc::new(client),
            sink,
            config.service.as_str(),
        );
        Self {
            inner: Arc::new(EngineInner {
                config,
                ctx,
                scheduler: Mutex::new(None),
                cancel: CancellationToken::new(),
            }),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    pub fn state(&self) -> &Arc<SyncState> {
        &self.inner.ctx.state
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Register one periodic sync loop per resource type.
    ///
    /// Calling it again while running is a no-op.
    pub async fn start(&self) {
        let mut slot = self.inner.scheduler.lock().await;
        if slot.is_some() {
            return;
        }

        let period = self.inner.config.poll_interval;
        let mut scheduler = Scheduler::with_cancellation(self.inner.cancel.child_token());
        self.register::<Bridges>(&mut scheduler);
        self.register::<SerialPorts>(&mut scheduler);
        *slot = Some(scheduler);

        info!(base_url = %self.inner.config.base_url, ?period, "resource sync started");
    }

    /// Stop the periodic loops. Cycles already in flight finish on their own.
    ///
    /// Dropping the last clone of the engine stops the loops as well, without
    /// waiting for them.
    pub async fn shutdown(&self) {
        let scheduler = self.inner.scheduler.lock().await.take();
        if let Some(scheduler) = scheduler {
            scheduler.shutdown().await;
            info!("resource sync stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.inner.scheduler.lock().await.is_some()
    }

    fn register<R: Resource>(&self, scheduler: &mut Scheduler) {
        let ctx = self.inner.ctx.clone();
        scheduler.register(R::KIND.path(), self.inner.config.poll_interval, move || {
            let ctx = ctx.clone();
            async move {
                run_cycle::<R>(&ctx).await;
            }
        });
    }

    // ── Control surface ──────────────────────────────────────────

    /// Bypass the warm-cache skip rule until [`stop_fetching`](Self::stop_fetching).
    pub fn start_fetching(&self) {
        self.state().set_force_refresh(true);
    }

    pub fn stop_fetching(&self) {
        self.state().set_force_refresh(false);
    }

    pub fn is_fetching(&self) -> bool {
        self.state().force_refresh()
    }

    // ── Read accessors ───────────────────────────────────────────

    pub fn bridges(&self) -> ResourceRecord<Bridge> {
        self.state().bridges().snapshot()
    }

    pub fn serial_ports(&self) -> ResourceRecord<SerialPort> {
        self.state().serial_ports().snapshot()
    }

    pub fn snapshot<R: Resource>(&self) -> ResourceRecord<R::Item> {
        self.state().store::<R>().snapshot()
    }

    pub fn subscribe_bridges(&self) -> watch::Receiver<ResourceRecord<Bridge>> {
        self.state().bridges().subscribe()
    }

    pub fn subscribe_serial_ports(&self) -> watch::Receiver<ResourceRecord<SerialPort>> {
        self.state().serial_ports().subscribe()
    }

    // ── One-shot operations ──────────────────────────────────────

    /// Run a single cycle for `R` right now, outside the schedule.
    pub async fn sync_once<R: Resource>(&self) -> CycleOutcome {
        run_cycle::<R>(&self.inner.ctx).await
    }

    /// Fetch `R` directly, bypassing the store and the sink.
    pub async fn fetch<R: Resource>(&self) -> Result<Vec<R::Item>, CoreError> {
        Ok(self
            .inner
            .ctx
            .client
            .get_list::<R::Item>(R::KIND.path())
            .await?)
    }
}
