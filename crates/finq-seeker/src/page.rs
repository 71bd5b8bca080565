//! Page-windowed slicing of an ordered result.

use serde::Serialize;

use crate::error::{Result, SeekerError};

/// One page of results plus the metadata needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Records on this page.
    pub data: Vec<T>,
    /// Number of records that matched before slicing.
    pub total: usize,
    /// 1-based page number that was served.
    pub page: usize,
    /// Page size that was used.
    pub page_size: usize,
    /// `ceil(total / page_size)`, or 0 when `page_size` is 0.
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Transforms every record on the page, keeping the metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }

    /// Returns `true` if this page carries no records.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if a page follows this one.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slices `items` to the requested page.
///
/// `page` defaults to 1. `page_size` defaults to the number of items, which
/// serves everything as a single page. Pages past the end come back empty
/// with `total` and `total_pages` intact.
pub fn paginate<T>(items: Vec<T>, page: Option<usize>, page_size: Option<usize>) -> Result<Page<T>> {
    let page = page.unwrap_or(1);
    if page == 0 {
        return Err(SeekerError::InvalidPage(page));
    }

    let total = items.len();
    let page_size = match page_size {
        Some(0) => return Err(SeekerError::InvalidPageSize(0)),
        Some(size) => size,
        None => total,
    };

    let total_pages = if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    };

    let start = (page - 1).saturating_mul(page_size);
    let data = if start >= total {
        Vec::new()
    } else {
        items.into_iter().skip(start).take(page_size).collect()
    };

    Ok(Page {
        data,
        total,
        page,
        page_size,
        total_pages,
    })
}
