//! Runtime value types for field comparison.
//!
//! The [`Value`] enum is what a record hands back when the engine asks for a
//! field. Every value has a canonical text form ([`Value::to_text`]) used by
//! text search, field-set membership and the lexicographic sort fallback.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

/// Runtime value for comparison, borrowed from the source record.
///
/// # Example
///
/// ```
/// use finq_seeker::{Number, Value};
///
/// struct Payment {
///     customer: String,
///     amount: f64,
/// }
///
/// fn read_field<'a>(payment: &'a Payment, field: &str) -> Value<'a> {
///     match field {
///         "customer" => Value::String(&payment.customer),
///         "amount" => Value::Number(Number::F64(payment.amount)),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Point in time, milliseconds since the Unix epoch.
    Timestamp(Timestamp),
    /// Boolean value.
    Bool(bool),
    /// Flattened list of values (tags, linked ids, nested codes).
    List(Vec<Value<'a>>),
    /// Field not present, null, or unsupported.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` for a missing value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Borrowed text of a `String` value.
    pub fn as_str(&self) -> Option<&'a str> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    /// Numeric view used by range filters and numeric ordering.
    ///
    /// Timestamps count as their millisecond value; everything else that is
    /// not a number yields `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.to_f64()),
            Value::Timestamp(t) => Some(t.as_millis() as f64),
            _ => None,
        }
    }

    /// Canonical text form, or `None` for a missing value.
    ///
    /// Lists join their elements with `,`; missing elements render empty.
    pub fn to_text(&self) -> Option<Cow<'a, str>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(*s)),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Timestamp(t) => Some(Cow::Owned(t.to_rfc3339())),
            Value::Bool(true) => Some(Cow::Borrowed("true")),
            Value::Bool(false) => Some(Cow::Borrowed("false")),
            Value::List(items) => {
                let parts: Vec<Cow<'a, str>> = items
                    .iter()
                    .map(|item| item.to_text().unwrap_or(Cow::Borrowed("")))
                    .collect();
                Some(Cow::Owned(parts.join(",")))
            }
            Value::None => None,
        }
    }
}

/// A number as read from a record.
///
/// Integers keep their exact representation; mixed-kind comparisons widen to
/// `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Number {
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Numeric ordering, or `None` when a NaN is involved.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        use Number::*;
        match (self, other) {
            (I64(x), I64(y)) => Some(x.cmp(&y)),
            (U64(x), U64(y)) => Some(x.cmp(&y)),
            (I64(x), U64(y)) => Some(i128::from(x).cmp(&i128::from(y))),
            (U64(x), I64(y)) => Some(i128::from(x).cmp(&i128::from(y))),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

// Integral floats print without a fractional part ("100", not "100.0"),
// which is what f64's Display already does.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! number_from {
    ($($ty:ty => $variant:ident as $repr:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Number::$variant(<$repr>::from(n))
                }
            }
        )+
    };
}

number_from! {
    i32 => I64 as i64,
    i64 => I64 as i64,
    u32 => U64 as u64,
    u64 => U64 as u64,
    f32 => F64 as f64,
    f64 => F64 as f64,
}

/// A point in time as milliseconds since the Unix epoch.
///
/// ```
/// use finq_seeker::Timestamp;
///
/// assert!(Timestamp(1000) < Timestamp(2000));
/// assert_eq!(Timestamp(0).to_rfc3339(), "1970-01-01T00:00:00.000Z");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// RFC 3339 UTC text with millisecond precision and a `Z` suffix.
    ///
    /// Falls back to the raw millisecond count when the value is outside the
    /// range chrono can represent.
    pub fn to_rfc3339(self) -> String {
        match Utc.timestamp_millis_opt(self.0).single() {
            Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
            None => self.0.to_string(),
        }
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}

impl<Tz: TimeZone> From<&DateTime<Tz>> for Timestamp {
    fn from(dt: &DateTime<Tz>) -> Self {
        Timestamp(dt.timestamp_millis())
    }
}
