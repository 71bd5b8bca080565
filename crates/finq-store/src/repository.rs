//! Query and mutation operations over one domain's collection.

use std::sync::Arc;

use chrono::Utc;
use finq_seeker::{FilterRequest, Page};
use serde_json::Value as Json;
use tracing::{debug, info};

use crate::collection::Collection;
use crate::error::Result;
use crate::record::{merge, new_id, Record, RecordFilter};
use crate::source::DataSource;

/// CRUD access to the records of type `T`.
///
/// Not-found is never an error: lookups return `Ok(None)` and deletes
/// `Ok(false)`. Writes are last-write-wins.
#[derive(Debug)]
pub struct Repository<T> {
    collection: Collection<T>,
}

impl<T: Record> Repository<T> {
    /// Repository over `T::SOURCE_PATH` in `source`.
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self::with_collection(Collection::new(source, T::SOURCE_PATH))
    }

    pub fn with_collection(collection: Collection<T>) -> Self {
        Self { collection }
    }

    pub fn collection(&self) -> &Collection<T> {
        &self.collection
    }

    /// Runs `request` over the collection.
    pub fn list(&self, request: &FilterRequest) -> Result<Page<T>> {
        self.list_with(request, |_| true)
    }

    /// Runs `request`, keeping only records accepted by `predicate`.
    pub fn list_with<P>(&self, request: &FilterRequest, predicate: P) -> Result<Page<T>>
    where
        P: Fn(&T) -> bool,
    {
        let page = self.collection.read(|items| {
            request
                .execute_with(items, predicate, &T::default_order())
                .map(|page| page.map(T::clone))
        })??;
        debug!(
            path = T::SOURCE_PATH,
            total = page.total,
            page = page.page,
            "listed records"
        );
        Ok(page)
    }

    /// Runs a domain filter.
    pub fn query<F: RecordFilter<T>>(&self, filter: &F) -> Result<Page<T>> {
        self.list_with(&filter.request(), |record| filter.matches(record))
    }

    pub fn get(&self, id: &str) -> Result<Option<T>> {
        self.collection
            .read(|items| items.iter().find(|record| record.id() == id).cloned())
    }

    /// Builds a record from defaults overlaid with `patch` and puts it first.
    pub fn create(&self, patch: &Json) -> Result<T> {
        let blank = T::blank(new_id(T::ID_PREFIX), Utc::now());
        let record = merge(&blank, patch, false)?;
        self.insert(record)
    }

    /// Puts `record` at the front of the collection.
    pub fn insert(&self, record: T) -> Result<T> {
        let stored = record.clone();
        self.collection.write(move |items| items.insert(0, stored))?;
        info!(path = T::SOURCE_PATH, id = record.id(), "record created");
        Ok(record)
    }

    /// Adds `record` after every existing one.
    pub fn append(&self, record: T) -> Result<T> {
        let stored = record.clone();
        self.collection.write(move |items| items.push(stored))?;
        info!(path = T::SOURCE_PATH, id = record.id(), "record appended");
        Ok(record)
    }

    /// Shallow-merges `patch` over the record with `id` and re-stamps it.
    pub fn update(&self, id: &str, patch: &Json) -> Result<Option<T>> {
        let updated = self.collection.write(|items| -> Result<Option<T>> {
            let Some(slot) = items.iter_mut().find(|record| record.id() == id) else {
                return Ok(None);
            };
            let now = Utc::now();
            let mut record = merge(slot, patch, true)?;
            if let Some(fields) = patch.as_object() {
                record.fill_derived(fields, now);
            }
            record.touch(now);
            *slot = record.clone();
            Ok(Some(record))
        })??;

        match &updated {
            Some(_) => info!(path = T::SOURCE_PATH, id, "record updated"),
            None => debug!(path = T::SOURCE_PATH, id, "update target not found"),
        }
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        let removed = self.collection.write(|items| {
            let before = items.len();
            items.retain(|record| record.id() != id);
            items.len() != before
        })?;
        if removed {
            info!(path = T::SOURCE_PATH, id, "record deleted");
        }
        Ok(removed)
    }

    pub fn len(&self) -> Result<usize> {
        self.collection.read(|items| items.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Forgets every in-memory change; the next access reloads.
    pub fn reset(&self) {
        self.collection.reset();
    }

    pub fn reload(&self) -> Result<usize> {
        self.collection.reload()
    }
}
