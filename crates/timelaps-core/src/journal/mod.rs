//! In-memory session journal.
//!
//! Records are kept in insertion order. A separate pin set marks records
//! shown in the "Pinned" group; everything else is "Unpinned". Both views
//! are sorted most-recent-start first.
//!
//! Every operation is infallible: deleting or pinning an id with no record
//! is a no-op, so the review screen can never fail on stale input.

mod record;

pub use record::{SessionId, SessionRecord, UNNAMED_SESSION};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Ids of pinned records.
pub type PinSet = BTreeSet<SessionId>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    records: Vec<SessionRecord>,
    #[serde(default)]
    pins: PinSet,
    #[serde(default)]
    next_id: u64,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an unused id and append a new record. Returns the new id.
    ///
    /// The counter wraps at `u64::MAX` and skips ids still in the journal.
    pub fn record(
        &mut self,
        name: impl Into<String>,
        duration_secs: u64,
        started_at: DateTime<Utc>,
        recorded_at: DateTime<Utc>,
    ) -> SessionId {
        let id = self.allocate_id();
        self.append(SessionRecord::new(id, name, duration_secs, started_at, recorded_at));
        id
    }

    /// Append a record as-is. No dedup.
    pub fn append(&mut self, record: SessionRecord) {
        if let Some(next) = record.id.get().checked_add(1) {
            self.next_id = self.next_id.max(next);
        }
        tracing::debug!(id = %record.id, duration_secs = record.duration_secs, "session appended");
        self.records.push(record);
    }

    fn allocate_id(&mut self) -> SessionId {
        let mut candidate = self.next_id;
        while self.get(SessionId::new(candidate)).is_some() {
            candidate = candidate.wrapping_add(1);
        }
        self.next_id = candidate.wrapping_add(1);
        SessionId::new(candidate)
    }

    /// Remove every record with `id`. Returns the first removed record,
    /// or `None` when nothing matched.
    pub fn delete(&mut self, id: SessionId) -> Option<SessionRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        let removed = self.records.remove(index);
        self.records.retain(|r| r.id != id);
        self.pins.remove(&id);
        tracing::debug!(%id, "session deleted");
        Some(removed)
    }

    /// Flip pin membership for `id`. Returns whether it is now pinned.
    pub fn toggle_pin(&mut self, id: SessionId) -> bool {
        let pinned = if self.pins.remove(&id) {
            false
        } else {
            self.pins.insert(id);
            true
        };
        tracing::debug!(%id, pinned, "pin toggled");
        pinned
    }

    pub fn is_pinned(&self, id: SessionId) -> bool {
        self.pins.contains(&id)
    }

    pub fn pins(&self) -> &PinSet {
        &self.pins
    }

    /// Pinned records, most recent start first.
    pub fn pinned_view(&self) -> Vec<&SessionRecord> {
        self.sorted_where(|r| self.pins.contains(&r.id))
    }

    /// Unpinned records, most recent start first.
    pub fn unpinned_view(&self) -> Vec<&SessionRecord> {
        self.sorted_where(|r| !self.pins.contains(&r.id))
    }

    pub fn get(&self, id: SessionId) -> Option<&SessionRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SessionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn sorted_where(&self, keep: impl Fn(&SessionRecord) -> bool) -> Vec<&SessionRecord> {
        let mut view: Vec<&SessionRecord> = self.records.iter().filter(|r| keep(r)).collect();
        // `sort_by` is stable: equal start times stay in insertion order.
        view.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn ids(view: &[&SessionRecord]) -> Vec<u64> {
        view.iter().map(|r| r.id.get()).collect()
    }

    #[test]
    fn record_allocates_increasing_ids() {
        let mut journal = Journal::new();
        let a = journal.record("a", 300, t(0), t(300));
        let b = journal.record("b", 300, t(0), t(300));
        assert_ne!(a, b);
        assert_eq!(journal.len(), 2);
        assert_eq!(journal.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn append_keeps_counter_ahead_of_foreign_ids() {
        let mut journal = Journal::new();
        journal.append(SessionRecord::new(SessionId::new(41), "imported", 60, t(0), t(60)));
        let next = journal.record("fresh", 60, t(1), t(61));
        assert_eq!(next, SessionId::new(42));
    }

    #[test]
    fn delete_is_a_noop_for_unknown_ids() {
        let mut journal = Journal::new();
        let id = journal.record("Focus", 600, t(0), t(600));
        assert!(journal.delete(SessionId::new(99)).is_none());
        assert_eq!(journal.len(), 1);

        let removed = journal.delete(id).unwrap();
        assert_eq!(removed.name, "Focus");
        assert!(journal.get(id).is_none());
        assert!(journal.delete(id).is_none());
        assert!(journal.is_empty());
    }

    #[test]
    fn delete_clears_pin() {
        let mut journal = Journal::new();
        let id = journal.record("x", 60, t(0), t(60));
        journal.toggle_pin(id);
        journal.delete(id);
        assert!(!journal.is_pinned(id));
    }

    #[test]
    fn toggle_pin_twice_restores_membership() {
        let mut journal = Journal::new();
        let id = journal.record("x", 60, t(0), t(60));
        assert!(journal.toggle_pin(id));
        assert!(journal.is_pinned(id));
        assert!(!journal.toggle_pin(id));
        assert!(!journal.is_pinned(id));
    }

    #[test]
    fn toggle_pin_tolerates_missing_records() {
        let mut journal = Journal::new();
        let ghost = SessionId::new(7);
        assert!(journal.toggle_pin(ghost));
        assert!(journal.pinned_view().is_empty());
        assert!(journal.unpinned_view().is_empty());
    }

    #[test]
    fn views_sort_by_start_time_descending() {
        let mut journal = Journal::new();
        let old = journal.record("old", 60, t(0), t(60));
        let new = journal.record("new", 60, t(1000), t(1060));
        let mid = journal.record("mid", 60, t(500), t(560));
        journal.toggle_pin(mid);

        assert_eq!(ids(&journal.unpinned_view()), vec![new.get(), old.get()]);
        assert_eq!(ids(&journal.pinned_view()), vec![mid.get()]);
    }

    #[test]
    fn equal_start_times_keep_insertion_order() {
        let mut journal = Journal::new();
        let start = t(0);
        let a = journal.record("A", 60, start, start + Duration::seconds(60));
        let b = journal.record("B", 60, start, start + Duration::seconds(60));

        let first = ids(&journal.unpinned_view());
        assert_eq!(first, vec![a.get(), b.get()]);
        for _ in 0..5 {
            assert_eq!(ids(&journal.unpinned_view()), first);
        }
    }

    #[test]
    fn id_counter_wraps_past_the_largest_id() {
        let mut journal = Journal::new();
        journal.record("first", 60, t(0), t(60));
        journal.append(SessionRecord::new(SessionId::new(u64::MAX), "imported", 60, t(1), t(61)));

        let a = journal.record("a", 60, t(2), t(62));
        let b = journal.record("b", 60, t(3), t(63));

        let mut all: Vec<u64> = journal.iter().map(|r| r.id.get()).collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 4);
        assert_ne!(a, SessionId::new(u64::MAX));
        assert_ne!(a, b);
    }

    #[test]
    fn recorded_ids_skip_ones_still_in_use() {
        let mut journal = Journal::new();
        journal.append(SessionRecord::new(SessionId::new(u64::MAX - 1), "x", 60, t(0), t(60)));
        assert_eq!(journal.record("y", 60, t(1), t(61)), SessionId::new(u64::MAX));
        journal.append(SessionRecord::new(SessionId::new(0), "z", 60, t(2), t(62)));
        assert_eq!(journal.record("w", 60, t(3), t(63)), SessionId::new(1));
    }

    proptest! {
        #[test]
        fn views_partition_the_journal(
            starts in proptest::collection::vec(0i64..50, 0..30),
            pins in proptest::collection::vec(0u64..40, 0..40),
        ) {
            let mut journal = Journal::new();
            for (i, start) in starts.iter().enumerate() {
                journal.record(format!("s{i}"), 60, t(*start), t(*start + 60));
            }
            for p in pins {
                journal.toggle_pin(SessionId::new(p));
            }

            let pinned = ids(&journal.pinned_view());
            let unpinned = ids(&journal.unpinned_view());
            prop_assert_eq!(pinned.len() + unpinned.len(), journal.len());
            for id in &pinned {
                prop_assert!(!unpinned.contains(id));
            }
            let mut all: Vec<u64> = pinned.into_iter().chain(unpinned).collect();
            all.sort_unstable();
            let mut expected: Vec<u64> = journal.iter().map(|r| r.id.get()).collect();
            expected.sort_unstable();
            prop_assert_eq!(all, expected);
        }
    }
}
