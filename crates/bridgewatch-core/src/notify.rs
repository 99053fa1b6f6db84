// ── Notification sink ──
//
// Failure reports leave the engine through `NotificationSink::push`.
// Delivery is someone else's problem; push must not block the cycle.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::warn;

use crate::resource::ResourceKind;

/// A structured failure report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Service the report is attributed to (e.g. `bridget`).
    pub service: String,
    /// Stable failure-kind code, e.g. `BRIDGES_FETCH_FAIL`.
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// Report for a failed fetch of `resource`.
    pub fn fetch_failed(
        service: &str,
        resource: ResourceKind,
        err: &bridgewatch_api::Error,
    ) -> Self {
        Self {
            service: service.to_owned(),
            kind: resource.failure_code().to_owned(),
            message: format!("Could not fetch available {}: {err}", resource.label()),
            timestamp: Utc::now(),
        }
    }
}

/// Receiver of structured failure reports.
pub trait NotificationSink: Send + Sync {
    fn push(&self, notification: Notification);
}

/// Writes every notification to the log at `warn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn push(&self, n: Notification) {
        warn!(service = %n.service, kind = %n.kind, "{}", n.message);
    }
}

/// Forwards notifications to an unbounded channel for a UI or CLI consumer.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationSink for ChannelSink {
    fn push(&self, notification: Notification) {
        // A closed receiver means nobody is listening anymore.
        let _ = self.tx.send(notification);
    }
}
