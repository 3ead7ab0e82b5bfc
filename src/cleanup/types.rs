use std::fmt;

use serde::Serialize;

use crate::parser::{AssignmentRecord, RefId};

/// Identity shared by assignments that duplicate each other
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GroupKey {
    pub shift_id: Option<RefId>,
    pub employee_id: Option<RefId>,
    pub role: String,
}

impl GroupKey {
    /// Derives the key for a record; role is compared uppercased
    pub fn of(record: &AssignmentRecord) -> Self {
        Self {
            shift_id: record.shift_id.clone(),
            employee_id: record.employee_id.clone(),
            role: record.role.as_deref().unwrap_or("").to_uppercase(),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |id: &Option<RefId>| {
            id.as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string)
        };
        write!(
            f,
            "shift={}, emp={}, role={}",
            show(&self.shift_id),
            show(&self.employee_id),
            self.role
        )
    }
}

/// A record removed in favour of the canonical member of its group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discarded {
    pub id: String,
    pub key: GroupKey,
}

/// Outcome of a resolution pass: one kept id per group, everything else discarded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub kept: Vec<String>,
    pub discarded: Vec<Discarded>,
}

impl Resolution {
    pub fn kept_count(&self) -> usize {
        self.kept.len()
    }

    pub fn is_kept(&self, id: &str) -> bool {
        self.kept.iter().any(|k| k == id)
    }
}
