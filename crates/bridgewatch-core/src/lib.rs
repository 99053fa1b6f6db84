//! Periodic resource synchronization between the bridget API and local
//! consumers.
//!
//! - **[`Engine`]** -- Facade owning the state, client, and scheduler.
//!   [`start()`](Engine::start) registers one polling loop per resource
//!   type; [`start_fetching()`](Engine::start_fetching) forces refreshes
//!   past the warm cache.
//!
//! - **[`SyncState`]** / **[`ResourceStore`]** -- Per-type records with
//!   atomic snapshots and `watch`-based change notification.
//!
//! - **[`run_cycle`]** -- One skip-or-fetch, classify, commit pass. Gateway
//!   outages are committed silently; every other failure is pushed to the
//!   [`NotificationSink`].
//!
//! - **[`Scheduler`]** -- Fixed-interval, fire-and-forget task loops with
//!   cooperative shutdown.

pub mod config;
pub mod engine;
pub mod error;
pub mod notify;
pub mod resource;
pub mod scheduler;
pub mod store;
pub mod sync;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{CoreError, FailureClass, FailureKind, SyncFailure, classify};
pub use notify::{ChannelSink, LogSink, Notification, NotificationSink};
pub use resource::{Bridges, Resource, ResourceKind, SerialPorts};
pub use scheduler::Scheduler;
pub use store::{ResourceRecord, ResourceStore, SyncState};
pub use sync::{CycleOutcome, SkipReason, SyncContext, run_cycle};

pub use bridgewatch_api::{Bridge, SerialPort};
