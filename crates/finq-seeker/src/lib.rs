//! Seeker - filter, sort and paginate in-memory record collections.
//!
//! The engine works over any slice of records implementing [`Seekable`]. It
//! never mutates the slice: every stage operates on a `Vec<&T>` view and the
//! result is a [`Page`] of references that callers clone if they need owned
//! records.
//!
//! # Quick Start
//!
//! ```rust
//! use finq_seeker::{FilterRequest, Number, OrderBy, Seekable, Value};
//!
//! struct Task {
//!     name: String,
//!     status: String,
//!     priority: i64,
//! }
//!
//! impl Seekable for Task {
//!     const SEARCH_FIELDS: &'static [&'static str] = &["name", "status"];
//!
//!     fn seeker_field_value(&self, field: &str) -> Value<'_> {
//!         match field {
//!             "name" => Value::String(&self.name),
//!             "status" => Value::String(&self.status),
//!             "priority" => Value::Number(Number::I64(self.priority)),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! let tasks = vec![
//!     Task { name: "Accrue payroll".into(), status: "Open".into(), priority: 3 },
//!     Task { name: "Bank rec".into(), status: "Done".into(), priority: 5 },
//!     Task { name: "FX revaluation".into(), status: "Open".into(), priority: 5 },
//! ];
//!
//! let page = FilterRequest::new()
//!     .field_in("status", ["Open"])
//!     .range("priority", Some(4.0), None)
//!     .build()
//!     .execute(&tasks, &OrderBy::desc("priority"))
//!     .unwrap();
//!
//! assert_eq!(page.total, 1);
//! assert_eq!(page.data[0].name, "FX revaluation");
//! ```
//!
//! # Pipeline
//!
//! ```text
//! text search → field sets → caller predicate → ranges → sort → paginate
//! ```
//!
//! - **Text search** lowercases the term and looks for it inside the text form
//!   of each field listed in [`Seekable::SEARCH_FIELDS`].
//! - **Field sets** keep records whose field text form is one of the allowed
//!   values.
//! - **Ranges** keep records whose numeric value lies within inclusive bounds.
//! - **Sort** is stable; missing values always come last.
//! - **Paginate** slices a 1-based page; pages past the end are empty.

mod error;
mod filter;
mod ordering;
mod page;
mod request;
mod traits;
mod value;

pub use error::{Result, SeekerError};
pub use filter::{field_in, in_range, text_search};
pub use ordering::{compare_values, sort_stable, Dir, OrderBy};
pub use page::{paginate, Page};
pub use request::{FieldSet, FilterRequest, RangeBound};
pub use traits::Seekable;
pub use value::{Number, Timestamp, Value};
