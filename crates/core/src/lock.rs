// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-target write locks
//!
//! Mutations on one target are rejected outright while another mutation on
//! the same target is in flight. Reads share the lock and only wait behind a
//! writer.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

/// Lazily-populated map of target name to reader/writer lock
#[derive(Debug, Clone, Default)]
pub struct LockRegistry {
    locks: Arc<DashMap<String, Arc<RwLock<()>>>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the lock for `key`, creating it on first access
    fn lock_for(&self, key: &str) -> Arc<RwLock<()>> {
        if let Some(lock) = self.locks.get(key) {
            return Arc::clone(lock.value());
        }
        Arc::clone(
            self.locks
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(RwLock::new(())))
                .value(),
        )
    }

    /// Try to take exclusive access without waiting
    ///
    /// Returns `None` when another writer or any reader holds the lock.
    /// An empty key always succeeds with a guard that holds nothing.
    pub fn try_lock(&self, key: &str) -> Option<WriteGuard> {
        if key.is_empty() {
            return Some(WriteGuard { guard: None });
        }
        match self.lock_for(key).try_write_owned() {
            Ok(guard) => Some(WriteGuard { guard: Some(guard) }),
            Err(_) => {
                tracing::debug!(cluster = key, "write lock contended");
                None
            }
        }
    }

    /// Take shared access, waiting while a writer holds the lock
    pub async fn read_lock(&self, key: &str) -> ReadGuard {
        if key.is_empty() {
            return ReadGuard { guard: None };
        }
        let guard = self.lock_for(key).read_owned().await;
        ReadGuard { guard: Some(guard) }
    }

    /// Number of locks created so far
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    #[cfg(test)]
    fn same_lock(&self, a: &str, b: &str) -> bool {
        Arc::ptr_eq(&self.lock_for(a), &self.lock_for(b))
    }
}

/// Exclusive access to one target; released on drop
#[derive(Debug)]
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct WriteGuard {
    guard: Option<OwnedRwLockWriteGuard<()>>,
}

impl WriteGuard {
    pub fn unlock(self) {
        drop(self.guard);
    }
}

/// Shared access to one target; released on drop
#[derive(Debug)]
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct ReadGuard {
    guard: Option<OwnedRwLockReadGuard<()>>,
}

impl ReadGuard {
    pub fn unlock(self) {
        drop(self.guard);
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
