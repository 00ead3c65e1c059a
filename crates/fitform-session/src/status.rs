use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Save-status feedback for the UI.
///
/// `idle → saving → (saved | error)`; `saved` decays back to `idle` after a
/// short display delay. `stalled` replaces `error` once a run of consecutive
/// failures passes the configured threshold — retries continue, but the UI
/// should stop implying the next one will succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SaveStatus {
    Idle,
    Saving,
    Saved,
    Error,
    Stalled,
}
