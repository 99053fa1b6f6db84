// ── Resource store ──
//
// Per-type records with atomic snapshots and push-based change notification.

mod record;
mod state;

pub use record::{InFlightGuard, ResourceRecord, ResourceStore};
pub use state::SyncState;
