//! The [`Seekable`] trait: how the engine reads fields from a record.

use crate::value::Value;

/// A record the engine can search, filter and sort.
///
/// Field names are the record's external (JSON) names, so the same strings
/// that arrive in a filter request address fields directly.
///
/// ```
/// use finq_seeker::{Number, Seekable, Value};
///
/// struct Dispute {
///     reference: String,
///     amount_cents: u64,
///     reviewer: Option<String>,
/// }
///
/// impl Seekable for Dispute {
///     const SEARCH_FIELDS: &'static [&'static str] = &["reference", "reviewer"];
///
///     fn seeker_field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "reference" => Value::String(&self.reference),
///             "amountCents" => Value::Number(Number::from(self.amount_cents)),
///             "reviewer" => self.reviewer.as_deref().map_or(Value::None, Value::String),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Seekable {
    /// Fields scanned by free-text search.
    ///
    /// Each listed field is reduced to its text form and searched as a whole;
    /// nested structures are never walked field by field.
    const SEARCH_FIELDS: &'static [&'static str];

    /// Value of `field`, or [`Value::None`] when it is unknown or empty.
    fn seeker_field_value(&self, field: &str) -> Value<'_>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Number;

    struct Ledger {
        account: &'static str,
        balance: Option<f64>,
    }

    impl Seekable for Ledger {
        const SEARCH_FIELDS: &'static [&'static str] = &["account"];

        fn seeker_field_value(&self, field: &str) -> Value<'_> {
            match field {
                "account" => Value::String(self.account),
                "balance" => self.balance.map_or(Value::None, |b| Value::Number(b.into())),
                _ => Value::None,
            }
        }
    }

    #[test]
    fn unknown_and_empty_fields_read_as_none() {
        let ledger = Ledger {
            account: "1010 Operating",
            balance: None,
        };
        assert_eq!(ledger.seeker_field_value("account"), Value::String("1010 Operating"));
        assert_eq!(ledger.seeker_field_value("balance"), Value::None);
        assert_eq!(ledger.seeker_field_value("currency"), Value::None);
    }

    #[test]
    fn numeric_fields_keep_their_value() {
        let ledger = Ledger {
            account: "2000 Payables",
            balance: Some(-125.5),
        };
        assert_eq!(
            ledger.seeker_field_value("balance"),
            Value::Number(Number::F64(-125.5))
        );
    }
}
