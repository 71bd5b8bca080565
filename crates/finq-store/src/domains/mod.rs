//! Typed records and filters for each finance-ops domain.
//!
//! Every domain module defines its record (camelCase JSON, matching the data
//! files), the record's [`Seekable`](finq_seeker::Seekable) and
//! [`Record`](crate::Record) impls, and a filter that reduces to a
//! [`FilterRequest`](finq_seeker::FilterRequest) plus an optional predicate.

use chrono::{DateTime, Utc};
use finq_seeker::{Number, Timestamp, Value};

pub mod audit;
pub mod close;
pub mod collections;
pub mod igrs;
pub mod payments;
pub mod reconciliation;
pub mod revenue;

/// Declares a closed set of display labels serialized as those labels.
macro_rules! label_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
        default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use label_enum;

label_enum! {
    /// Urgency shared by revenue cases and close tasks.
    pub enum Priority {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Critical => "Critical",
    }
    default Medium
}

pub(crate) fn opt_text(value: &Option<String>) -> Value<'_> {
    value.as_deref().map_or(Value::None, Value::String)
}

pub(crate) fn amount(value: f64) -> Value<'static> {
    Value::Number(Number::F64(value))
}

pub(crate) fn time(value: &DateTime<Utc>) -> Value<'static> {
    Value::Timestamp(Timestamp::from(value))
}

pub(crate) fn opt_time(value: &Option<DateTime<Utc>>) -> Value<'static> {
    value.as_ref().map_or(Value::None, time)
}
