//! Explicit time-bound cache for scan results.
//!
//! The cache never reads the clock itself; callers pass `now`.

use super::scanner::{ScanResult, ScanTarget};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::path::PathBuf;

/// A value plus the time it was fetched and how long it stays usable.
#[derive(Debug, Clone)]
pub struct Cached<T> {
    pub value: T,
    pub fetched_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl<T> Cached<T> {
    pub fn new(value: T, fetched_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            value,
            fetched_at,
            ttl,
        }
    }

    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.fetched_at
    }

    /// A zero (or negative) TTL is never fresh.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        let age = self.age(now);
        age >= Duration::zero() && age < self.ttl
    }
}

/// Identifies one scan request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScanKey {
    pub type_folder: PathBuf,
    pub targets: Vec<ScanTarget>,
}

#[derive(Debug)]
pub struct ScanCache {
    ttl: Duration,
    entries: HashMap<ScanKey, Cached<ScanResult>>,
}

impl ScanCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get_fresh(&self, key: &ScanKey, now: DateTime<Utc>) -> Option<&ScanResult> {
        self.entries
            .get(key)
            .filter(|cached| cached.is_fresh(now))
            .map(|cached| &cached.value)
    }

    pub fn insert(&mut self, key: ScanKey, value: ScanResult, now: DateTime<Utc>) {
        if self.ttl <= Duration::zero() {
            return;
        }
        self.entries.retain(|_, cached| cached.is_fresh(now));
        self.entries.insert(key, Cached::new(value, now, self.ttl));
    }

    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
