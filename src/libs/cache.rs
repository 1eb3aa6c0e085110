//! Bounded memo of rendered cell display strings.
//!
//! Entries are keyed by `(employee, date, field)`. When a new key arrives and
//! the cache is full, the oldest inserted entry is evicted (FIFO, not LRU):
//! reads never refresh an entry and overwriting a key keeps its position.
//!
//! The cache has no invalidation of its own. Its owner clears it when the
//! underlying facts change; [`MatrixBuilder`](crate::libs::matrix::MatrixBuilder)
//! does so by comparing fact table generations.

pub use crate::libs::classifier::CellField;
use crate::libs::fact::EmployeeId;
use chrono::{NaiveDate, NaiveTime};
use std::collections::{HashMap, VecDeque};

pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub employee_id: EmployeeId,
    pub date_epoch_millis: i64,
    pub field: CellField,
}

impl CacheKey {
    pub fn new(employee_id: EmployeeId, date: NaiveDate, field: CellField) -> Self {
        CacheKey {
            employee_id,
            date_epoch_millis: date.and_time(NaiveTime::MIN).and_utc().timestamp_millis(),
            field,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PivotCache {
    capacity: usize,
    entries: HashMap<CacheKey, String>,
    order: VecDeque<CacheKey>,
    hits: u64,
    misses: u64,
}

impl Default for PivotCache {
    fn default() -> Self {
        PivotCache::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl PivotCache {
    /// A cache holding at most `capacity` entries. Zero stores nothing.
    pub fn new(capacity: usize) -> Self {
        PivotCache {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&mut self, employee_id: EmployeeId, date: NaiveDate, field: CellField) -> Option<String> {
        let value = self.entries.get(&CacheKey::new(employee_id, date, field)).cloned();
        match value {
            Some(_) => self.hits += 1,
            None => self.misses += 1,
        }
        value
    }

    pub fn put(&mut self, key: CacheKey, value: String) {
        if self.capacity == 0 {
            return;
        }
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = value;
            return;
        }
        while self.entries.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        self.order.push_back(key);
        self.entries.insert(key, value);
    }

    /// Returns the cached string, computing and storing it on a miss.
    pub fn get_or_insert_with<F>(&mut self, employee_id: EmployeeId, date: NaiveDate, field: CellField, compute: F) -> String
    where
        F: FnOnce() -> String,
    {
        if let Some(value) = self.get(employee_id, date, field) {
            return value;
        }
        let value = compute();
        self.put(CacheKey::new(employee_id, date, field), value.clone());
        value
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `(hits, misses)` since creation or the last [`clear`](Self::clear).
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
