//! Revenue-assurance cases: detected leakage and its recovery.

use chrono::{DateTime, Utc};
use finq_seeker::{FilterRequest, OrderBy, Seekable, Value};
use serde::{Deserialize, Serialize};

use super::{amount, label_enum, opt_text, time, Priority};
use crate::record::{ListOptions, Record, RecordFilter};

label_enum! {
    pub enum RevenueStatus {
        Open => "Open",
        Investigating => "Investigating",
        Recovering => "Recovering",
        Recovered => "Recovered",
        Dismissed => "Dismissed",
    }
    default Open
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueCase {
    pub id: String,
    pub title: String,
    pub status: RevenueStatus,
    pub category: String,
    pub priority: Priority,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub leakage_amount: f64,
    #[serde(default)]
    pub recovered_amount: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    pub detected_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RevenueCase {
    /// Leakage not yet recovered.
    pub fn open_amount(&self) -> f64 {
        (self.leakage_amount - self.recovered_amount).max(0.0)
    }
}

impl Seekable for RevenueCase {
    const SEARCH_FIELDS: &'static [&'static str] = &[
        "id",
        "title",
        "status",
        "category",
        "priority",
        "owner",
        "customerName",
        "leakageAmount",
        "recoveredAmount",
        "tags",
        "detectedAt",
        "updatedAt",
    ];

    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::String(&self.id),
            "title" => Value::String(&self.title),
            "status" => Value::String(self.status.as_str()),
            "category" => Value::String(&self.category),
            "priority" => Value::String(self.priority.as_str()),
            "owner" => opt_text(&self.owner),
            "customerName" => opt_text(&self.customer_name),
            "leakageAmount" => amount(self.leakage_amount),
            "recoveredAmount" => amount(self.recovered_amount),
            "openAmount" => amount(self.open_amount()),
            "tags" => Value::List(self.tags.iter().map(|t| Value::String(t.as_str())).collect()),
            "detectedAt" => time(&self.detected_at),
            "updatedAt" => time(&self.updated_at),
            _ => Value::None,
        }
    }
}

impl Record for RevenueCase {
    const SOURCE_PATH: &'static str = "/data/revenue-assurance/cases.json";
    const ID_PREFIX: &'static str = "RA";

    fn id(&self) -> &str {
        &self.id
    }

    fn default_order() -> OrderBy {
        OrderBy::desc("detectedAt")
    }

    fn blank(id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: String::new(),
            status: RevenueStatus::default(),
            category: "Uncategorized".to_string(),
            priority: Priority::default(),
            owner: None,
            customer_name: None,
            leakage_amount: 0.0,
            recovered_amount: 0.0,
            tags: Vec::new(),
            detected_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevenueCaseFilter {
    #[serde(flatten)]
    pub options: ListOptions,
    pub status: Vec<String>,
    pub category: Vec<String>,
    pub priority: Vec<String>,
    pub owner: Vec<String>,
    pub min_leakage_amount: Option<f64>,
    pub max_leakage_amount: Option<f64>,
}

impl RecordFilter<RevenueCase> for RevenueCaseFilter {
    fn request(&self) -> FilterRequest {
        self.options
            .request()
            .field_in("status", &self.status)
            .field_in("category", &self.category)
            .field_in("priority", &self.priority)
            .field_in("owner", &self.owner)
            .range("leakageAmount", self.min_leakage_amount, self.max_leakage_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn case(id: &str, category: &str, priority: Priority, leakage: f64, day: u32) -> RevenueCase {
        RevenueCase {
            category: category.into(),
            priority,
            leakage_amount: leakage,
            ..RevenueCase::blank(id.into(), Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap())
        }
    }

    #[test]
    fn filters_by_category_priority_and_leakage() {
        let cases = vec![
            case("RA-1", "Billing Error", Priority::High, 4_000.0, 1),
            case("RA-2", "Billing Error", Priority::Low, 9_000.0, 2),
            case("RA-3", "Unbilled Usage", Priority::High, 7_500.0, 3),
            case("RA-4", "Billing Error", Priority::Critical, 12_000.0, 4),
        ];
        let filter = RevenueCaseFilter {
            category: vec!["Billing Error".into()],
            priority: vec!["High".into(), "Critical".into()],
            min_leakage_amount: Some(5_000.0),
            ..RevenueCaseFilter::default()
        };

        let page = filter
            .request()
            .execute(&cases, &RevenueCase::default_order())
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].id, "RA-4");
    }

    #[test]
    fn default_order_is_most_recent_detection() {
        let cases = vec![
            case("RA-1", "Pricing", Priority::Low, 1.0, 3),
            case("RA-2", "Pricing", Priority::Low, 1.0, 9),
            case("RA-3", "Pricing", Priority::Low, 1.0, 5),
        ];
        let page = RevenueCaseFilter::default()
            .request()
            .execute(&cases, &RevenueCase::default_order())
            .unwrap();
        let ids: Vec<&str> = page.data.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["RA-2", "RA-3", "RA-1"]);
    }

    #[test]
    fn open_amount_never_negative() {
        let mut case = case("RA-1", "Pricing", Priority::Low, 100.0, 1);
        case.recovered_amount = 150.0;
        assert_eq!(case.open_amount(), 0.0);
        case.recovered_amount = 40.0;
        assert_eq!(case.seeker_field_value("openAmount").as_f64(), Some(60.0));
    }

    #[test]
    fn search_reaches_leakage_amount() {
        let cases = vec![
            case("RA-1", "Billing Error", Priority::High, 7_777.25, 1),
            case("RA-2", "Billing Error", Priority::High, 300.0, 2),
        ];
        let page = FilterRequest::new()
            .search("7777.25")
            .execute(&cases, &RevenueCase::default_order())
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].id, "RA-1");
    }
}
