use std::collections::HashSet;

use serde::Serialize;

use crate::error::StoreError;
use crate::store::AssignmentStore;
use super::resolver::resolve_duplicates;
use super::types::Discarded;

/// Summary returned to callers after a cleanup pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub week: String,
    pub deleted: usize,
    pub kept: usize,
    pub message: String,
    /// Records actually deleted, in the order they were removed
    #[serde(skip)]
    pub removed: Vec<Discarded>,
}

impl CleanupReport {
    pub fn new(week: &str, removed: Vec<Discarded>, kept: usize) -> Self {
        let deleted = removed.len();
        Self {
            week: week.to_string(),
            deleted,
            kept,
            message: format!("Cleaned up {deleted} duplicate assignments, kept {kept}"),
            removed,
        }
    }
}

/// Removes duplicate manual assignments for one week.
///
/// Reads every assignment of `week`, keeps one record per
/// (shift, employee, role) group and deletes the rest. A discarded record
/// whose id is also a kept id is left in place, since deleting by that id
/// would take the kept record with it. Any store failure aborts the pass and
/// is returned as is; a week with nothing to clean yields a report with zero
/// counts.
pub fn cleanup_week(
    store: &dyn AssignmentStore,
    week: &str,
) -> Result<CleanupReport, StoreError> {
    let records = store.list(week)?;
    let resolution = resolve_duplicates(&records);

    let mut seen: HashSet<&str> = HashSet::new();
    let mut removed = Vec::new();
    for discarded in &resolution.discarded {
        if !seen.insert(discarded.id.as_str()) {
            continue;
        }
        if resolution.is_kept(&discarded.id) {
            tracing::warn!(week, id = %discarded.id, group = %discarded.key,
                "duplicate shares its id with a kept assignment, leaving it");
            continue;
        }
        store.delete(week, &discarded.id)?;
        tracing::info!(week, id = %discarded.id, group = %discarded.key,
            "deleted duplicate assignment");
        removed.push(discarded.clone());
    }

    let report = CleanupReport::new(week, removed, resolution.kept_count());
    tracing::info!(week, deleted = report.deleted, kept = report.kept, "{}", report.message);
    Ok(report)
}
