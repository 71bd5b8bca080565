//! Lazily loaded, cached record collections.
//!
//! A [`Collection`] owns the in-memory copy of one domain's records. The first
//! access fetches and parses the source document; every later read and write
//! works on the cached copy, which is never written back.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::source::DataSource;

/// Cached records of one type loaded from a [`DataSource`].
///
/// Readers share the cache; writers and the initial load hold it exclusively.
pub struct Collection<T> {
    source: Arc<dyn DataSource>,
    path: String,
    cache: RwLock<Option<Vec<T>>>,
}

impl<T> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("path", &self.path)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl<T> Collection<T> {
    pub fn new(source: Arc<dyn DataSource>, path: impl Into<String>) -> Self {
        Self {
            source,
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    /// Source path this collection loads from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns `true` once the source has been fetched.
    pub fn is_loaded(&self) -> bool {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Drops the cached records. The next access loads them again.
    pub fn reset(&self) {
        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = None;
        debug!(path = %self.path, "collection reset");
    }
}

impl<T: DeserializeOwned> Collection<T> {
    /// Runs `f` over the cached records, loading them first if needed.
    pub fn read<R>(&self, f: impl FnOnce(&[T]) -> R) -> Result<R> {
        {
            let guard = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(items) = guard.as_ref() {
                return Ok(f(items.as_slice()));
            }
        }

        let mut guard = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let items = self.ensure_loaded(&mut guard)?;
        Ok(f(items.as_slice()))
    }

    /// Runs `f` with exclusive access to the cached records.
    pub fn write<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> Result<R> {
        let mut guard = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let items = self.ensure_loaded(&mut guard)?;
        Ok(f(items))
    }

    /// Discards the cache and fetches the source again, returning the number
    /// of records loaded. On failure the previous cache is left empty.
    pub fn reload(&self) -> Result<usize> {
        let mut guard = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
        let count = self.ensure_loaded(&mut guard)?.len();
        info!(path = %self.path, count, "collection reloaded");
        Ok(count)
    }

    fn ensure_loaded<'g>(&self, slot: &'g mut Option<Vec<T>>) -> Result<&'g mut Vec<T>> {
        let items = match slot.take() {
            Some(items) => items,
            None => self.fetch()?,
        };
        Ok(slot.insert(items))
    }

    fn fetch(&self) -> Result<Vec<T>> {
        let raw = self.source.read(&self.path).map_err(|err| {
            warn!(path = %self.path, error = %err, "collection load failed");
            err
        })?;
        let items: Vec<T> = serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path, count = items.len(), "collection loaded");
        Ok(items)
    }
}
