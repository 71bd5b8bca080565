//! Ordering types for query result sorting.
//!
//! Provides [`Dir`] for sort direction, [`OrderBy`] for field-based ordering
//! and [`sort_stable`], which orders a record view without disturbing ties.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::traits::Seekable;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    #[default]
    Asc,
    Desc,
}

impl Dir {
    /// Flips `ordering` for descending sorts.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort key: a field name plus a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    #[serde(default)]
    pub dir: Dir,
}

impl OrderBy {
    /// Creates a new ascending ordering for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Asc)
    }

    /// Creates a new descending ordering for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Desc)
    }

    /// Creates a new ordering with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            field: field.into(),
            dir,
        }
    }

    /// Compares two values according to this ordering.
    ///
    /// Missing values sort after present ones in both directions; only the
    /// comparison between present values is reversed by [`Dir::Desc`].
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Ordering {
        match (a.is_none(), b.is_none()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.dir.apply(compare_values(a, b)),
        }
    }
}

/// Ascending comparison of two present values.
///
/// Numbers (and timestamps) compare numerically when both sides are numeric;
/// every other pairing falls back to comparing text forms. NaN compares equal
/// to everything.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.compare(*y).unwrap_or(Ordering::Equal),
        (Value::Timestamp(x), Value::Timestamp(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => a.to_text().cmp(&b.to_text()),
    }
}

/// Sorts a record view by `orderings`, keeping ties in their incoming order.
///
/// Keys are extracted once per record and paired with the record's position,
/// which serves as the final tiebreaker.
pub fn sort_stable<'a, T: Seekable>(items: Vec<&'a T>, orderings: &[OrderBy]) -> Vec<&'a T> {
    if orderings.is_empty() || items.len() < 2 {
        return items;
    }

    let mut keyed: Vec<(usize, Vec<Value<'a>>, &'a T)> = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let keys = orderings
                .iter()
                .map(|order_by| item.seeker_field_value(&order_by.field))
                .collect();
            (index, keys, item)
        })
        .collect();

    keyed.sort_by(|(index_a, keys_a, _), (index_b, keys_b, _)| {
        orderings
            .iter()
            .zip(keys_a.iter().zip(keys_b.iter()))
            .map(|(order_by, (a, b))| order_by.compare(a, b))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or_else(|| index_a.cmp(index_b))
    });

    keyed.into_iter().map(|(_, _, item)| item).collect()
}
