//! Receivables accounts in the collections workflow.

use chrono::{DateTime, Utc};
use finq_seeker::{FilterRequest, Number, OrderBy, Seekable, Value};
use serde::{Deserialize, Serialize};

use super::{amount, label_enum, opt_text, opt_time, time};
use crate::record::{ListOptions, Record, RecordFilter};

label_enum! {
    pub enum CollectionStatus {
        Current => "Current",
        InCollections => "In Collections",
        PromiseToPay => "Promise to Pay",
        Disputed => "Disputed",
        WrittenOff => "Written Off",
    }
    default Current
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionAccount {
    pub id: String,
    pub customer_name: String,
    pub segment: String,
    pub status: CollectionStatus,
    #[serde(default)]
    pub collector: Option<String>,
    pub outstanding_amount: f64,
    pub days_past_due: u32,
    #[serde(default)]
    pub last_contact_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub next_action: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Seekable for CollectionAccount {
    const SEARCH_FIELDS: &'static [&'static str] = &[
        "id",
        "customerName",
        "segment",
        "status",
        "collector",
        "outstandingAmount",
        "daysPastDue",
        "lastContactAt",
        "nextAction",
        "updatedAt",
    ];

    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::String(&self.id),
            "customerName" => Value::String(&self.customer_name),
            "segment" => Value::String(&self.segment),
            "status" => Value::String(self.status.as_str()),
            "collector" => opt_text(&self.collector),
            "outstandingAmount" => amount(self.outstanding_amount),
            "daysPastDue" => Value::Number(Number::from(self.days_past_due)),
            "lastContactAt" => opt_time(&self.last_contact_at),
            "nextAction" => opt_text(&self.next_action),
            "updatedAt" => time(&self.updated_at),
            _ => Value::None,
        }
    }
}

impl Record for CollectionAccount {
    const SOURCE_PATH: &'static str = "/data/collections/accounts.json";
    const ID_PREFIX: &'static str = "COL";

    fn id(&self) -> &str {
        &self.id
    }

    fn default_order() -> OrderBy {
        OrderBy::desc("daysPastDue")
    }

    fn blank(id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            customer_name: String::new(),
            segment: String::new(),
            status: CollectionStatus::default(),
            collector: None,
            outstanding_amount: 0.0,
            days_past_due: 0,
            last_contact_at: None,
            next_action: None,
            updated_at: now,
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollectionAccountFilter {
    #[serde(flatten)]
    pub options: ListOptions,
    pub status: Vec<String>,
    pub segment: Vec<String>,
    pub collector: Vec<String>,
    pub min_outstanding_amount: Option<f64>,
    pub max_outstanding_amount: Option<f64>,
    pub min_days_past_due: Option<f64>,
    pub max_days_past_due: Option<f64>,
}

impl RecordFilter<CollectionAccount> for CollectionAccountFilter {
    fn request(&self) -> FilterRequest {
        self.options
            .request()
            .field_in("status", &self.status)
            .field_in("segment", &self.segment)
            .field_in("collector", &self.collector)
            .range(
                "outstandingAmount",
                self.min_outstanding_amount,
                self.max_outstanding_amount,
            )
            .range("daysPastDue", self.min_days_past_due, self.max_days_past_due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn account(id: &str, segment: &str, outstanding: f64, dpd: u32) -> CollectionAccount {
        CollectionAccount {
            segment: segment.into(),
            outstanding_amount: outstanding,
            days_past_due: dpd,
            ..CollectionAccount::blank(id.into(), Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap())
        }
    }

    #[test]
    fn two_ranges_and_default_order() {
        let accounts = vec![
            account("COL-1", "Enterprise", 50_000.0, 30),
            account("COL-2", "Enterprise", 80_000.0, 95),
            account("COL-3", "SMB", 90_000.0, 120),
            account("COL-4", "Enterprise", 70_000.0, 61),
            account("COL-5", "Enterprise", 5_000.0, 200),
        ];
        let filter = CollectionAccountFilter {
            segment: vec!["Enterprise".into()],
            min_outstanding_amount: Some(10_000.0),
            min_days_past_due: Some(60.0),
            ..CollectionAccountFilter::default()
        };

        let page = filter
            .request()
            .execute(&accounts, &CollectionAccount::default_order())
            .unwrap();
        let ids: Vec<&str> = page.data.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["COL-2", "COL-4"]);
    }

    #[test]
    fn days_past_due_is_a_whole_number_in_search() {
        let accounts = vec![account("COL-1", "SMB", 1.0, 45), account("COL-2", "SMB", 1.0, 7)];
        let page = FilterRequest::new()
            .field_in("daysPastDue", ["45"])
            .execute(&accounts, &CollectionAccount::default_order())
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].id, "COL-1");
    }

    #[test]
    fn search_reaches_amount_and_days_past_due() {
        let accounts = vec![
            account("COL-1", "SMB", 8_642.5, 137),
            account("COL-2", "SMB", 1_000.0, 12),
        ];
        for term in ["8642.5", "137"] {
            let page = FilterRequest::new()
                .search(term)
                .execute(&accounts, &CollectionAccount::default_order())
                .unwrap();
            assert_eq!(page.total, 1, "term {term:?}");
            assert_eq!(page.data[0].id, "COL-1");
        }
    }
}
