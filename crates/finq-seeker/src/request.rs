//! Filter requests and the fixed-order query pipeline.
//!
//! A [`FilterRequest`] collects every criterion a caller can express. Running
//! it always applies the stages in the same order:
//!
//! ```text
//! text search → field sets → caller predicate → ranges → sort → paginate
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filter::{field_in, in_range, text_search};
use crate::ordering::{sort_stable, Dir, OrderBy};
use crate::page::{paginate, Page};
use crate::traits::Seekable;

/// Allowed values for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSet {
    pub field: String,
    pub values: Vec<String>,
}

/// Inclusive numeric bounds for one field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeBound {
    pub field: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Criteria for a list query.
///
/// # Example
///
/// ```
/// use finq_seeker::{FilterRequest, Number, OrderBy, Seekable, Value};
///
/// struct Payment {
///     status: String,
///     amount: f64,
/// }
///
/// impl Seekable for Payment {
///     const SEARCH_FIELDS: &'static [&'static str] = &["status"];
///
///     fn seeker_field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "status" => Value::String(&self.status),
///             "amount" => Value::Number(Number::F64(self.amount)),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let payments = vec![
///     Payment { status: "Exception".into(), amount: 10.0 },
///     Payment { status: "Matched".into(), amount: 20.0 },
///     Payment { status: "Exception".into(), amount: 30.0 },
/// ];
///
/// let page = FilterRequest::new()
///     .field_in("status", ["Exception"])
///     .order_desc("amount")
///     .page_size(1)
///     .build()
///     .execute(&payments, &OrderBy::asc("amount"))
///     .unwrap();
///
/// assert_eq!(page.total, 2);
/// assert_eq!(page.total_pages, 2);
/// assert_eq!(page.data[0].amount, 30.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterRequest {
    pub search: Option<String>,
    pub field_sets: Vec<FieldSet>,
    pub ranges: Vec<RangeBound>,
    pub sort: Option<OrderBy>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl FilterRequest {
    /// Creates an empty request, which matches everything.
    pub fn new() -> Self {
        FilterRequest::default()
    }

    /// Sets the free-text search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Sets the search term only when one is given.
    pub fn search_opt(mut self, term: Option<&str>) -> Self {
        self.search = term.map(str::to_string);
        self
    }

    /// Restricts `field` to the given values. An empty set adds nothing.
    pub fn field_in<I, S>(mut self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if !values.is_empty() {
            self.field_sets.push(FieldSet {
                field: field.to_string(),
                values,
            });
        }
        self
    }

    /// Bounds `field` numerically. With both bounds absent nothing is added.
    pub fn range(mut self, field: &str, min: Option<f64>, max: Option<f64>) -> Self {
        if min.is_some() || max.is_some() {
            self.ranges.push(RangeBound {
                field: field.to_string(),
                min,
                max,
            });
        }
        self
    }

    /// Sets the sort field and direction.
    pub fn order_by(mut self, field: &str, dir: Dir) -> Self {
        self.sort = Some(OrderBy::new(field, dir));
        self
    }

    /// Sorts ascending by `field`.
    pub fn order_asc(self, field: &str) -> Self {
        self.order_by(field, Dir::Asc)
    }

    /// Sorts descending by `field`.
    pub fn order_desc(self, field: &str) -> Self {
        self.order_by(field, Dir::Desc)
    }

    /// Sets the 1-based page number.
    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Finalizes the request.
    pub fn build(self) -> Self {
        self
    }

    /// Returns `true` if no filtering criterion is set.
    ///
    /// Sorting and paging do not count as criteria.
    pub fn is_empty(&self) -> bool {
        self.search.as_deref().map_or(true, str::is_empty)
            && self.field_sets.is_empty()
            && self.ranges.is_empty()
    }

    /// Runs the pipeline with no caller predicate.
    pub fn execute<'a, T: Seekable>(
        &self,
        items: &'a [T],
        default_order: &OrderBy,
    ) -> Result<Page<&'a T>> {
        self.execute_with(items, |_| true, default_order)
    }

    /// Runs the pipeline, applying `predicate` between the field-set and range
    /// stages.
    ///
    /// `default_order` is used when the request names no sort of its own.
    pub fn execute_with<'a, T, P>(
        &self,
        items: &'a [T],
        predicate: P,
        default_order: &OrderBy,
    ) -> Result<Page<&'a T>>
    where
        T: Seekable,
        P: Fn(&T) -> bool,
    {
        let mut view: Vec<&'a T> = text_search(items.iter().collect(), self.search.as_deref());

        for set in &self.field_sets {
            view = field_in(view, &set.field, &set.values);
        }

        view.retain(|item| predicate(*item));

        for range in &self.ranges {
            view = in_range(view, &range.field, range.min, range.max);
        }

        let order = self.sort.as_ref().unwrap_or(default_order);
        let sorted = sort_stable(view, std::slice::from_ref(order));

        paginate(sorted, self.page, self.page_size)
    }
}
