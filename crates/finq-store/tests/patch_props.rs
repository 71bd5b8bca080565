//! Property tests for patch merging.

use chrono::{TimeZone, Utc};
use finq_store::domains::revenue::RevenueCase;
use finq_store::{merge, Record};
use proptest::prelude::*;
use serde_json::json;

fn base() -> RevenueCase {
    RevenueCase::blank(
        "RA-1".to_string(),
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    )
}

proptest! {
    /// Patched keys take the patch's value; untouched keys keep theirs.
    #[test]
    fn patched_fields_win(title in ".{0,40}", owner in proptest::option::of("[A-Za-z ]{1,20}"), quarters in 0u32..100_000_000) {
        let leakage = f64::from(quarters) / 4.0;
        let patch = json!({ "title": title, "owner": owner, "leakageAmount": leakage });
        let merged = merge(&base(), &patch, true).unwrap();

        prop_assert_eq!(&merged.title, &title);
        prop_assert_eq!(&merged.owner, &owner);
        prop_assert_eq!(merged.leakage_amount, leakage);
        prop_assert_eq!(merged.category, base().category);
        prop_assert_eq!(merged.detected_at, base().detected_at);
    }

    /// Protected merges never change the id.
    #[test]
    fn protected_id_survives(id in "[A-Z]{2}-[0-9]{1,6}") {
        let merged = merge(&base(), &json!({ "id": id }), true).unwrap();
        prop_assert_eq!(merged.id, "RA-1");
    }
}
