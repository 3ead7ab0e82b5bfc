use std::collections::HashMap;

use crate::parser::AssignmentRecord;
use super::types::{Discarded, GroupKey, Resolution};
use super::widest::select_widest;

/// Buckets manual assignments by group key, keeping first-encounter order for
/// both the buckets and their members
pub fn group_manual_assignments(
    records: &[AssignmentRecord],
) -> Vec<(GroupKey, Vec<&AssignmentRecord>)> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<(GroupKey, Vec<&AssignmentRecord>)> = Vec::new();

    for record in records.iter().filter(|r| r.is_manual()) {
        let key = GroupKey::of(record);
        match index.get(&key) {
            Some(&slot) => groups[slot].1.push(record),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![record]));
            }
        }
    }

    groups
}

/// Decides which manual assignments survive deduplication.
///
/// Auto-generated assignments are ignored and appear in neither list. Each
/// group keeps exactly one record; see [`select_widest`] for the rule.
pub fn resolve_duplicates(records: &[AssignmentRecord]) -> Resolution {
    let mut resolution = Resolution::default();

    for (key, members) in group_manual_assignments(records) {
        let Some(keep) = select_widest(&members) else {
            continue;
        };

        for (position, record) in members.iter().enumerate() {
            if position == keep {
                resolution.kept.push(record.id.clone());
            } else {
                resolution.discarded.push(Discarded {
                    id: record.id.clone(),
                    key: key.clone(),
                });
            }
        }
    }

    resolution
}
