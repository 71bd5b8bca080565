//! Predicate filters over record views.
//!
//! Each filter takes a `Vec<&T>` and returns the retained subset, so they
//! thread naturally one after another and never touch the records behind the
//! references.

use crate::traits::Seekable;

/// Keeps records where `term` occurs, case-insensitively, in the text form of
/// at least one of [`Seekable::SEARCH_FIELDS`].
///
/// An absent or empty term returns the view unchanged.
pub fn text_search<'a, T: Seekable>(items: Vec<&'a T>, term: Option<&str>) -> Vec<&'a T> {
    let needle = match term {
        Some(term) if !term.is_empty() => term.to_lowercase(),
        _ => return items,
    };

    items
        .into_iter()
        .filter(|item| {
            T::SEARCH_FIELDS.iter().any(|field| {
                item.seeker_field_value(field)
                    .to_text()
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            })
        })
        .collect()
}

/// Keeps records whose `field` text form is one of `allowed`.
///
/// An empty `allowed` set returns the view unchanged. Records with a missing
/// field never match a non-empty set.
pub fn field_in<'a, T, S>(items: Vec<&'a T>, field: &str, allowed: &[S]) -> Vec<&'a T>
where
    T: Seekable,
    S: AsRef<str>,
{
    if allowed.is_empty() {
        return items;
    }

    items
        .into_iter()
        .filter(|item| {
            item.seeker_field_value(field)
                .to_text()
                .is_some_and(|text| allowed.iter().any(|value| value.as_ref() == text))
        })
        .collect()
}

/// Keeps records whose numeric `field` lies within `[min, max]`.
///
/// Either bound may be absent. With both absent the view is returned
/// unchanged; otherwise records without a numeric value are dropped.
pub fn in_range<'a, T: Seekable>(
    items: Vec<&'a T>,
    field: &str,
    min: Option<f64>,
    max: Option<f64>,
) -> Vec<&'a T> {
    if min.is_none() && max.is_none() {
        return items;
    }

    items
        .into_iter()
        .filter(|item| match item.seeker_field_value(field).as_f64() {
            Some(value) => {
                min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
            }
            None => false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Number, Value};

    #[derive(Debug, PartialEq)]
    struct Invoice {
        number: String,
        customer: String,
        amount: f64,
        status: &'static str,
        tags: Vec<String>,
        memo: Option<String>,
    }

    impl Seekable for Invoice {
        const SEARCH_FIELDS: &'static [&'static str] = &["number", "customer", "amount", "tags"];

        fn seeker_field_value(&self, field: &str) -> Value<'_> {
            match field {
                "number" => Value::String(&self.number),
                "customer" => Value::String(&self.customer),
                "amount" => Value::Number(Number::F64(self.amount)),
                "status" => Value::String(self.status),
                "tags" => Value::List(self.tags.iter().map(|t| Value::String(t.as_str())).collect()),
                "memo" => self.memo.as_deref().map_or(Value::None, Value::String),
                _ => Value::None,
            }
        }
    }

    fn invoices() -> Vec<Invoice> {
        vec![
            Invoice {
                number: "INV-001".into(),
                customer: "Acme Corp".into(),
                amount: 1200.0,
                status: "Open",
                tags: vec!["priority".into()],
                memo: Some("net 30".into()),
            },
            Invoice {
                number: "INV-002".into(),
                customer: "Globex".into(),
                amount: 75.5,
                status: "Exception",
                tags: vec![],
                memo: None,
            },
            Invoice {
                number: "INV-003".into(),
                customer: "Initech".into(),
                amount: 300.0,
                status: "Matched",
                tags: vec!["disputed".into(), "priority".into()],
                memo: None,
            },
        ]
    }

    fn numbers(items: &[&Invoice]) -> Vec<String> {
        items.iter().map(|i| i.number.clone()).collect()
    }

    #[test]
    fn empty_search_is_identity() {
        let data = invoices();
        let view: Vec<&Invoice> = data.iter().collect();
        assert_eq!(text_search(view.clone(), None).len(), 3);
        assert_eq!(text_search(view, Some("")).len(), 3);
    }

    #[test]
    fn search_is_case_insensitive() {
        let data = invoices();
        let result = text_search(data.iter().collect(), Some("gLoBeX"));
        assert_eq!(numbers(&result), ["INV-002"]);
    }

    #[test]
    fn search_coerces_numbers_and_lists() {
        let data = invoices();
        assert_eq!(
            numbers(&text_search(data.iter().collect(), Some("75.5"))),
            ["INV-002"]
        );
        assert_eq!(
            numbers(&text_search(data.iter().collect(), Some("disputed,prio"))),
            ["INV-003"]
        );
    }

    #[test]
    fn search_ignores_fields_outside_search_list() {
        let data = invoices();
        assert!(text_search(data.iter().collect(), Some("net 30")).is_empty());
    }

    #[test]
    fn field_in_matches_text_form() {
        let data = invoices();
        let result = field_in(data.iter().collect(), "status", &["Exception", "Matched"]);
        assert_eq!(numbers(&result), ["INV-002", "INV-003"]);

        let by_amount = field_in(data.iter().collect(), "amount", &["300"]);
        assert_eq!(numbers(&by_amount), ["INV-003"]);
    }

    #[test]
    fn field_in_empty_set_is_identity() {
        let data = invoices();
        let none: [&str; 0] = [];
        assert_eq!(field_in(data.iter().collect(), "status", &none).len(), 3);
    }

    #[test]
    fn field_in_never_matches_missing_field() {
        let data = invoices();
        let result = field_in(data.iter().collect(), "memo", &["net 30", ""]);
        assert_eq!(numbers(&result), ["INV-001"]);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let data = invoices();
        let result = in_range(data.iter().collect(), "amount", Some(75.5), Some(300.0));
        assert_eq!(numbers(&result), ["INV-002", "INV-003"]);
    }

    #[test]
    fn range_with_one_side() {
        let data = invoices();
        assert_eq!(
            numbers(&in_range(data.iter().collect(), "amount", Some(301.0), None)),
            ["INV-001"]
        );
        assert_eq!(
            numbers(&in_range(data.iter().collect(), "amount", None, Some(100.0))),
            ["INV-002"]
        );
    }

    #[test]
    fn range_drops_non_numeric_fields() {
        let data = invoices();
        assert!(in_range(data.iter().collect(), "customer", Some(0.0), None).is_empty());
        assert_eq!(in_range(data.iter().collect(), "customer", None, None).len(), 3);
    }

    #[test]
    fn filters_leave_source_untouched() {
        let data = invoices();
        let before = data.len();
        let _ = field_in(data.iter().collect(), "status", &["Open"]);
        let _ = text_search(data.iter().collect(), Some("acme"));
        assert_eq!(data.len(), before);
        assert_eq!(data[1].status, "Exception");
    }
}
