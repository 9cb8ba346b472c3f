//! Thread-safe registry handle
//!
//! Wraps a [`Registry`] in a `RwLock` so concurrent callers see every
//! mutation as a single step: a match updates both players under one write
//! lock, and readers share the read lock.

use crate::config::RatingConfig;
use crate::error::{LadderError, LadderResult};
use crate::rating::registry::Registry;
use crate::types::{MatchRecord, MatchReport, PlayerStanding};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable, lock-guarded handle to a shared [`Registry`]
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Registry>>,
}

impl SharedRegistry {
    pub fn new(config: RatingConfig) -> LadderResult<Self> {
        Ok(Self::from_registry(Registry::new(config)?))
    }

    pub fn from_registry(registry: Registry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Run a read-only closure against the registry
    pub fn read<T>(&self, f: impl FnOnce(&Registry) -> T) -> LadderResult<T> {
        let guard = self.read_guard()?;
        Ok(f(&*guard))
    }

    /// Run a mutating closure with exclusive access to the registry
    pub fn write<T>(&self, f: impl FnOnce(&mut Registry) -> T) -> LadderResult<T> {
        let mut guard = self.write_guard()?;
        Ok(f(&mut *guard))
    }

    pub fn record_match(&self, record: &MatchRecord) -> LadderResult<MatchReport> {
        self.write(|registry| registry.record_match(record))?
    }

    pub fn get_overall_list(&self) -> LadderResult<Vec<PlayerStanding>> {
        self.read(Registry::get_overall_list)
    }

    /// Copy of the current registry state
    pub fn snapshot(&self) -> LadderResult<Registry> {
        self.read(Registry::clone)
    }

    fn read_guard(&self) -> LadderResult<RwLockReadGuard<'_, Registry>> {
        self.inner.read().map_err(|_| LadderError::InternalError {
            message: "Failed to acquire registry read lock".to_string(),
        })
    }

    fn write_guard(&self) -> LadderResult<RwLockWriteGuard<'_, Registry>> {
        self.inner.write().map_err(|_| LadderError::InternalError {
            message: "Failed to acquire registry write lock".to_string(),
        })
    }
}
