use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::error::StoreError;
use crate::parser::{AssignmentRecord, RefId};

const ID_LEN: usize = 20;

/// Fields of an assignment before the store has given it an id
#[derive(Debug, Clone, Default)]
pub struct NewAssignment {
    pub shift_id: Option<RefId>,
    pub employee_id: Option<RefId>,
    pub role: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_manual: bool,
}

/// Read/write access to the assignments of each week.
///
/// `delete` is idempotent: removing an id that is already gone returns
/// `Ok(false)`.
pub trait AssignmentStore: Send + Sync {
    fn list(&self, week: &str) -> Result<Vec<AssignmentRecord>, StoreError>;
    fn get(&self, week: &str, id: &str) -> Result<Option<AssignmentRecord>, StoreError>;
    fn insert(
        &self,
        week: &str,
        assignment: NewAssignment,
    ) -> Result<AssignmentRecord, StoreError>;
    fn delete(&self, week: &str, id: &str) -> Result<bool, StoreError>;
}

/// Week-scoped assignments kept in memory, in insertion order
#[derive(Debug, Default)]
pub struct InMemoryStore {
    weeks: Mutex<Weeks>,
}

type Weeks = HashMap<String, Vec<AssignmentRecord>>;

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one week already populated.
    ///
    /// Ids are unique within a week: a record repeating an earlier id is
    /// dropped with a warning.
    pub fn with_records(week: &str, records: Vec<AssignmentRecord>) -> Self {
        let mut unique: Vec<AssignmentRecord> = Vec::with_capacity(records.len());
        for record in records {
            if unique.iter().any(|r| r.id == record.id) {
                tracing::warn!(week, id = %record.id, "dropping assignment with a repeated id");
                continue;
            }
            unique.push(record);
        }

        let mut weeks = HashMap::new();
        weeks.insert(week.to_string(), unique);
        Self {
            weeks: Mutex::new(weeks),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Weeks>, StoreError> {
        self.weeks.lock().map_err(|_| StoreError::Poisoned)
    }
}

fn generate_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LEN)
        .map(char::from)
        .collect()
}

impl AssignmentStore for InMemoryStore {
    fn list(&self, week: &str) -> Result<Vec<AssignmentRecord>, StoreError> {
        Ok(self.lock()?.get(week).cloned().unwrap_or_default())
    }

    fn get(&self, week: &str, id: &str) -> Result<Option<AssignmentRecord>, StoreError> {
        Ok(self
            .lock()?
            .get(week)
            .and_then(|records| records.iter().find(|r| r.id == id).cloned()))
    }

    fn insert(
        &self,
        week: &str,
        assignment: NewAssignment,
    ) -> Result<AssignmentRecord, StoreError> {
        let mut weeks = self.lock()?;
        let records = weeks.entry(week.to_string()).or_default();

        let mut id = generate_id();
        while records.iter().any(|r| r.id == id) {
            id = generate_id();
        }

        let record = AssignmentRecord {
            id,
            shift_id: assignment.shift_id,
            employee_id: assignment.employee_id,
            role: assignment.role,
            start_time: assignment.start_time,
            end_time: assignment.end_time,
            is_manual: Some(assignment.is_manual),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        };
        records.push(record.clone());
        Ok(record)
    }

    fn delete(&self, week: &str, id: &str) -> Result<bool, StoreError> {
        let mut weeks = self.lock()?;
        let Some(records) = weeks.get_mut(week) else {
            return Ok(false);
        };
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual(shift: &str) -> NewAssignment {
        NewAssignment {
            shift_id: Some(shift.into()),
            employee_id: Some("E1".into()),
            role: Some("BARISTA".into()),
            is_manual: true,
            ..Default::default()
        }
    }

    #[test]
    fn insert_assigns_id_and_stamp() {
        let store = InMemoryStore::new();
        let record = store.insert("2025-W01", manual("S1")).unwrap();

        assert_eq!(record.id.len(), ID_LEN);
        assert!(record.id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(record.created_at.is_some());
        assert!(record.is_manual());
        assert_eq!(store.get("2025-W01", &record.id).unwrap(), Some(record));
    }

    #[test]
    fn weeks_are_isolated() {
        let store = InMemoryStore::new();
        store.insert("2025-W01", manual("S1")).unwrap();
        store.insert("2025-W02", manual("S2")).unwrap();

        assert_eq!(store.list("2025-W01").unwrap().len(), 1);
        assert_eq!(store.list("2025-W02").unwrap().len(), 1);
        assert!(store.list("2025-W03").unwrap().is_empty());
    }

    #[test]
    fn list_preserves_insertion_order() {
        let store = InMemoryStore::new();
        let first = store.insert("w", manual("S1")).unwrap();
        let second = store.insert("w", manual("S2")).unwrap();

        let ids: Vec<String> = store.list("w").unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn seeded_weeks_keep_the_first_record_per_id() {
        let record = |id: &str, end: &str| AssignmentRecord {
            id: id.into(),
            end_time: Some(end.into()),
            ..Default::default()
        };
        let store = InMemoryStore::with_records(
            "w",
            vec![record("A", "5:00 pm"), record("B", "2:00 pm"), record("A", "1:00 pm")],
        );

        let records = store.list("w").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(store.get("w", "A").unwrap().unwrap().end_time.as_deref(), Some("5:00 pm"));
    }

    #[test]
    fn delete_is_idempotent() {
        let store = InMemoryStore::new();
        let record = store.insert("w", manual("S1")).unwrap();

        assert!(store.delete("w", &record.id).unwrap());
        assert!(!store.delete("w", &record.id).unwrap());
        assert!(!store.delete("other", &record.id).unwrap());
        assert!(store.list("w").unwrap().is_empty());
    }
}
