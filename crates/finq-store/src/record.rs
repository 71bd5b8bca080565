//! The record contract shared by every domain, plus patch merging.

use chrono::{DateTime, Utc};
use finq_seeker::{Dir, FilterRequest, OrderBy, Seekable};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};
use uuid::Uuid;

use crate::error::{Result, StoreError};

/// A domain record stored in a [`Collection`](crate::Collection).
pub trait Record: Seekable + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Source document the collection loads from.
    const SOURCE_PATH: &'static str;

    /// Prefix of generated ids, as in `CASE-<uuid>`.
    const ID_PREFIX: &'static str;

    fn id(&self) -> &str;

    /// Order used when a request names no sort.
    fn default_order() -> OrderBy;

    /// A fresh record carrying only defaults.
    fn blank(id: String, now: DateTime<Utc>) -> Self;

    /// Re-stamps modification metadata after an update.
    fn touch(&mut self, _now: DateTime<Utc>) {}

    /// Recomputes fields that depend on keys in `patch`.
    ///
    /// Runs after the merge of an update. A key the patch sets itself is
    /// never overwritten.
    fn fill_derived(&mut self, _patch: &Map<String, Json>, _now: DateTime<Utc>) {}
}

/// Domain-specific criteria that reduce to a [`FilterRequest`] plus an
/// optional predicate.
pub trait RecordFilter<T> {
    fn request(&self) -> FilterRequest;

    /// Extra membership test run between the field-set and range stages.
    fn matches(&self, _record: &T) -> bool {
        true
    }
}

/// Search, sort and paging options every domain filter accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListOptions {
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<Dir>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl ListOptions {
    /// Base request carrying search, sort and paging; domains add the rest.
    pub fn request(&self) -> FilterRequest {
        let mut request = FilterRequest::new().search_opt(self.search.as_deref());
        if let Some(field) = &self.sort_by {
            request = request.order_by(field, self.sort_dir.unwrap_or_default());
        }
        request.page = self.page;
        request.page_size = self.page_size;
        request
    }
}

/// Generates `<prefix>-<uuid>`.
pub fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

/// Shallow-merges the keys of `patch` over `record`.
///
/// `patch` must be a JSON object. Each top-level key replaces the record's
/// value wholesale. With `keep_id` set, an `id` key in the patch is ignored.
pub fn merge<T: Record>(record: &T, patch: &Json, keep_id: bool) -> Result<T> {
    let Json::Object(changes) = patch else {
        return Err(StoreError::invalid_patch("patch must be a JSON object"));
    };

    let mut fields: Map<String, Json> = match serde_json::to_value(record) {
        Ok(Json::Object(fields)) => fields,
        Ok(_) => return Err(StoreError::invalid_patch("record is not a JSON object")),
        Err(err) => return Err(StoreError::invalid_patch(err.to_string())),
    };

    for (key, value) in changes {
        if keep_id && key == "id" {
            continue;
        }
        fields.insert(key.clone(), value.clone());
    }

    serde_json::from_value(Json::Object(fields)).map_err(|err| StoreError::invalid_patch(err.to_string()))
}
