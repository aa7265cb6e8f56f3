//! Identifier allocation.
//!
//! Sequential collections hand out `max(existing) + 1`. Counting records
//! instead would reuse ids after a delete. Once `u64::MAX` is taken the
//! sequential space is exhausted and `allocate` yields `None`.

use std::collections::HashSet;

use models::{IdStrategy, Record, RecordId};
use uuid::Uuid;

pub struct IdAllocator {
    strategy: IdStrategy,
    next_int: Option<u64>,
    taken: HashSet<RecordId>,
}

impl IdAllocator {
    pub fn new<I>(strategy: IdStrategy, existing: I) -> Self
    where
        I: IntoIterator<Item = RecordId>,
    {
        let taken: HashSet<RecordId> = existing.into_iter().collect();
        let next_int = match taken.iter().filter_map(RecordId::as_int).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };
        Self { strategy, next_int, taken }
    }

    pub fn for_records(strategy: IdStrategy, records: &[Record]) -> Self {
        Self::new(strategy, records.iter().filter_map(Record::id))
    }

    /// Next id, never equal to any existing or previously allocated one.
    pub fn allocate(&mut self) -> Option<RecordId> {
        let id = match self.strategy {
            IdStrategy::Sequential => {
                let n = self.next_int?;
                self.next_int = n.checked_add(1);
                RecordId::Int(n)
            }
            IdStrategy::Uuid => loop {
                let candidate = RecordId::Str(Uuid::new_v4().to_string());
                if !self.taken.contains(&candidate) {
                    break candidate;
                }
            },
        };
        self.taken.insert(id.clone());
        Some(id)
    }
}
