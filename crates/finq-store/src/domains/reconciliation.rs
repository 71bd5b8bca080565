//! Balance-sheet account reconciliations per period.

use chrono::{DateTime, Utc};
use finq_seeker::{FilterRequest, OrderBy, Seekable, Value};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use super::{amount, label_enum, opt_text, time};
use crate::record::{ListOptions, Record, RecordFilter};

label_enum! {
    pub enum ReconciliationStatus {
        NotStarted => "Not Started",
        InProgress => "In Progress",
        PendingReview => "Pending Review",
        Approved => "Approved",
        Exception => "Exception",
    }
    default NotStarted
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    pub id: String,
    pub account_number: String,
    pub account_name: String,
    /// Accounting period, `YYYY-MM`.
    pub period: String,
    pub status: ReconciliationStatus,
    #[serde(default)]
    pub preparer: Option<String>,
    #[serde(default)]
    pub reviewer: Option<String>,
    pub gl_balance: f64,
    pub statement_balance: f64,
    pub variance: f64,
    pub updated_at: DateTime<Utc>,
}

impl Reconciliation {
    /// Ledger minus statement balance.
    pub fn computed_variance(&self) -> f64 {
        self.gl_balance - self.statement_balance
    }
}

impl Seekable for Reconciliation {
    const SEARCH_FIELDS: &'static [&'static str] = &[
        "id",
        "accountNumber",
        "accountName",
        "period",
        "status",
        "preparer",
        "reviewer",
        "glBalance",
        "statementBalance",
        "variance",
        "updatedAt",
    ];

    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::String(&self.id),
            "accountNumber" => Value::String(&self.account_number),
            "accountName" => Value::String(&self.account_name),
            "period" => Value::String(&self.period),
            "status" => Value::String(self.status.as_str()),
            "preparer" => opt_text(&self.preparer),
            "reviewer" => opt_text(&self.reviewer),
            "glBalance" => amount(self.gl_balance),
            "statementBalance" => amount(self.statement_balance),
            "variance" => amount(self.variance),
            "updatedAt" => time(&self.updated_at),
            _ => Value::None,
        }
    }
}

impl Record for Reconciliation {
    const SOURCE_PATH: &'static str = "/data/reconciliation/accounts.json";
    const ID_PREFIX: &'static str = "REC";

    fn id(&self) -> &str {
        &self.id
    }

    fn default_order() -> OrderBy {
        OrderBy::desc("updatedAt")
    }

    fn blank(id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            account_number: String::new(),
            account_name: String::new(),
            period: now.format("%Y-%m").to_string(),
            status: ReconciliationStatus::default(),
            preparer: None,
            reviewer: None,
            gl_balance: 0.0,
            statement_balance: 0.0,
            variance: 0.0,
            updated_at: now,
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// New balances without an explicit `variance` recompute it.
    fn fill_derived(&mut self, patch: &Map<String, Json>, _now: DateTime<Utc>) {
        let balances_changed =
            patch.contains_key("glBalance") || patch.contains_key("statementBalance");
        if balances_changed && !patch.contains_key("variance") {
            self.variance = self.computed_variance();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReconciliationFilter {
    #[serde(flatten)]
    pub options: ListOptions,
    pub status: Vec<String>,
    pub period: Vec<String>,
    pub preparer: Vec<String>,
    pub min_variance: Option<f64>,
    pub max_variance: Option<f64>,
}

impl RecordFilter<Reconciliation> for ReconciliationFilter {
    fn request(&self) -> FilterRequest {
        self.options
            .request()
            .field_in("status", &self.status)
            .field_in("period", &self.period)
            .field_in("preparer", &self.preparer)
            .range("variance", self.min_variance, self.max_variance)
    }
}
