//! `docsync preview`: render what a flush would submit

use chrono::NaiveDate;
use docsync_aggregator::{FlushPayload, PendingSet, DEFAULT_SESSION_LABEL};
use std::path::PathBuf;

/// Build the payload a flush of `paths` on `date` would send
///
/// Paths are deduplicated the same way the pending set does it. No filtering
/// is applied, so this also previews paths `check` would ignore.
pub fn preview(paths: Vec<PathBuf>, date: NaiveDate) -> FlushPayload {
    let mut pending = PendingSet::new();
    for path in paths {
        pending.insert(path);
    }
    FlushPayload::new(pending.drain(), date, DEFAULT_SESSION_LABEL)
}
