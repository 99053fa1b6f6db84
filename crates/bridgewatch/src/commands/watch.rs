//! Live view: run the engine until Ctrl-C, printing commits and failures.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};

use bridgewatch_core::{
    Bridge, ChannelSink, Engine, Notification, ResourceKind, ResourceRecord, SyncFailure,
};

use crate::cli::{GlobalOpts, WatchArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Events ──────────────────────────────────────────────────────────

/// A committed record, as printed on stdout.
#[derive(Debug, Serialize)]
struct ListEvent<'a, T> {
    resource: ResourceKind,
    count: usize,
    items: &'a [T],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a SyncFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_success: Option<DateTime<Utc>>,
}

impl<'a, T> ListEvent<'a, T> {
    fn new(resource: ResourceKind, rec: &'a ResourceRecord<T>) -> Self {
        Self {
            resource,
            count: rec.items.len(),
            items: &rec.items,
            error: rec.last_error.as_ref(),
            last_success: rec.last_success,
        }
    }

    fn text(&self, item_label: impl Fn(&T) -> String) -> String {
        let labels: Vec<String> = self.items.iter().map(item_label).collect();
        match self.error {
            Some(err) => format!("{}: none ({:?}: {})", self.resource, err.kind, err.message),
            None if labels.is_empty() => format!("{}: none", self.resource),
            None => format!("{}: {}", self.resource, labels.join(", ")),
        }
    }
}

fn notification_text(note: &Notification, color: bool) -> String {
    let stamp = note.timestamp.format("%H:%M:%S");
    if color {
        format!("{} {} {}", stamp.dimmed(), note.kind.red().bold(), note.message)
    } else {
        format!("{stamp} {} {}", note.kind, note.message)
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: WatchArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let config = config::resolve_engine_config(global, args.interval_ms)?;
    let (sink, mut notes) = ChannelSink::new();
    let engine = Engine::new(config, Arc::new(sink))?;

    if args.force {
        engine.start_fetching();
    }

    let mut bridges = engine.subscribe_bridges();
    let mut ports = engine.subscribe_serial_ports();
    let color = output::should_color(&global.color);

    engine.start().await;
    info!(base_url = %engine.config().base_url, force = args.force, "watching");

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                debug!("interrupt received");
                break;
            }
            Some(note) = notes.recv() => {
                let line = output::render_event(&global.output, &note, |n| notification_text(n, color));
                eprintln!("{line}");
            }
            Ok(()) = bridges.changed() => {
                print_committed(global, ResourceKind::Bridges, &mut bridges, Bridge::label);
            }
            Ok(()) = ports.changed() => {
                print_committed(global, ResourceKind::SerialPorts, &mut ports, String::clone);
            }
        }
    }

    engine.stop_fetching();
    engine.shutdown().await;
    Ok(())
}

/// Print the latest record unless a request is still outstanding.
fn print_committed<T: Clone + Serialize>(
    global: &GlobalOpts,
    resource: ResourceKind,
    rx: &mut watch::Receiver<ResourceRecord<T>>,
    item_label: impl Fn(&T) -> String,
) {
    let rec = rx.borrow_and_update().clone();
    if rec.updating {
        return;
    }
    let event = ListEvent::new(resource, &rec);
    let line = output::render_event(&global.output, &event, |e| e.text(&item_label));
    output::print_output(&line, global.quiet);
}
