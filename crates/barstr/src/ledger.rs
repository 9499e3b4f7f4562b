use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use crate::types::LEDGER_CAPACITY;

/// In-memory record of event ids already handled by this process.
///
/// The set never grows past `capacity`: recording one more distinct id
/// clears everything first. Old ids may then be handled a second time,
/// which the relay subscriptions' `since` window keeps rare.
#[derive(Debug)]
pub struct ProcessedIds {
    ids: Mutex<HashSet<String>>,
    capacity: usize,
}

impl ProcessedIds {
    pub fn new() -> Self {
        Self::with_capacity_limit(LEDGER_CAPACITY)
    }

    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            ids: Mutex::new(HashSet::new()),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.ids.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn seen(&self, id: &str) -> bool {
        self.lock().contains(id)
    }

    pub fn record(&self, id: &str) {
        let mut ids = self.lock();
        Self::insert(&mut ids, id, self.capacity);
    }

    /// Checks and records `id` under one lock.
    ///
    /// Returns `true` only for the first caller with a given id, so two
    /// concurrent deliveries of the same event cannot both proceed.
    pub fn check_and_record(&self, id: &str) -> bool {
        let mut ids = self.lock();
        if ids.contains(id) {
            return false;
        }
        Self::insert(&mut ids, id, self.capacity);
        true
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn insert(ids: &mut HashSet<String>, id: &str, capacity: usize) {
        if ids.contains(id) {
            return;
        }
        if ids.len() >= capacity {
            ids.clear();
        }
        ids.insert(id.to_string());
    }
}

impl Default for ProcessedIds {
    fn default() -> Self {
        Self::new()
    }
}
