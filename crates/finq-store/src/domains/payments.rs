//! Cash-application payments awaiting or carrying invoice matches.

use chrono::{DateTime, Utc};
use finq_seeker::{FilterRequest, OrderBy, Seekable, Value};
use serde::{Deserialize, Serialize};

use super::{amount, label_enum, opt_text, time};
use crate::record::{ListOptions, Record, RecordFilter};

label_enum! {
    pub enum PaymentStatus {
        Unmatched => "Unmatched",
        PartiallyMatched => "Partially Matched",
        Matched => "Matched",
        Exception => "Exception",
    }
    default Unmatched
}

label_enum! {
    pub enum PaymentMethod {
        Ach => "ACH",
        Wire => "Wire",
        Check => "Check",
        Card => "Card",
    }
    default Ach
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub reference: String,
    pub customer_name: String,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    #[serde(default)]
    pub matched_invoices: Vec<String>,
    #[serde(default)]
    pub exception_reason: Option<String>,
    pub received_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Seekable for Payment {
    const SEARCH_FIELDS: &'static [&'static str] = &[
        "id",
        "reference",
        "customerName",
        "amount",
        "currency",
        "method",
        "status",
        "matchedInvoices",
        "exceptionReason",
        "receivedAt",
        "updatedAt",
    ];

    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::String(&self.id),
            "reference" => Value::String(&self.reference),
            "customerName" => Value::String(&self.customer_name),
            "amount" => amount(self.amount),
            "currency" => Value::String(&self.currency),
            "method" => Value::String(self.method.as_str()),
            "status" => Value::String(self.status.as_str()),
            "matchedInvoices" => Value::List(
                self.matched_invoices
                    .iter()
                    .map(|invoice| Value::String(invoice.as_str()))
                    .collect(),
            ),
            "exceptionReason" => opt_text(&self.exception_reason),
            "receivedAt" => time(&self.received_at),
            "updatedAt" => time(&self.updated_at),
            _ => Value::None,
        }
    }
}

impl Record for Payment {
    const SOURCE_PATH: &'static str = "/data/cash-application/payments.json";
    const ID_PREFIX: &'static str = "PAY";

    fn id(&self) -> &str {
        &self.id
    }

    fn default_order() -> OrderBy {
        OrderBy::desc("receivedAt")
    }

    fn blank(id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            reference: String::new(),
            customer_name: String::new(),
            amount: 0.0,
            currency: default_currency(),
            method: PaymentMethod::default(),
            status: PaymentStatus::default(),
            matched_invoices: Vec::new(),
            exception_reason: None,
            received_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentFilter {
    #[serde(flatten)]
    pub options: ListOptions,
    pub status: Vec<String>,
    pub method: Vec<String>,
    pub customer_name: Vec<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
}

impl RecordFilter<Payment> for PaymentFilter {
    fn request(&self) -> FilterRequest {
        self.options
            .request()
            .field_in("status", &self.status)
            .field_in("method", &self.method)
            .field_in("customerName", &self.customer_name)
            .range("amount", self.min_amount, self.max_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn payment(id: &str, status: PaymentStatus, method: PaymentMethod, amount: f64) -> Payment {
        Payment {
            status,
            method,
            amount,
            customer_name: "Acme Corp".into(),
            ..Payment::blank(id.into(), Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
        }
    }

    #[test]
    fn filters_status_method_and_amount() {
        let payments = vec![
            payment("PAY-1", PaymentStatus::Exception, PaymentMethod::Wire, 250.0),
            payment("PAY-2", PaymentStatus::Exception, PaymentMethod::Ach, 1_250.0),
            payment("PAY-3", PaymentStatus::Matched, PaymentMethod::Wire, 900.0),
            payment("PAY-4", PaymentStatus::Exception, PaymentMethod::Wire, 1_000.0),
        ];
        let filter: PaymentFilter = serde_json::from_value(serde_json::json!({
            "status": ["Exception"],
            "method": ["Wire"],
            "minAmount": 500,
            "maxAmount": 1000
        }))
        .unwrap();

        let page = filter.request().execute(&payments, &Payment::default_order()).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].id, "PAY-4");
    }

    #[test]
    fn search_matches_invoice_numbers_and_amounts() {
        let mut with_invoices = payment("PAY-1", PaymentStatus::Matched, PaymentMethod::Ach, 1_500.0);
        with_invoices.matched_invoices = vec!["INV-7001".into(), "INV-7002".into()];
        let payments = vec![
            with_invoices,
            payment("PAY-2", PaymentStatus::Unmatched, PaymentMethod::Check, 42.5),
        ];

        let by_invoice = FilterRequest::new()
            .search("inv-7002")
            .execute(&payments, &Payment::default_order())
            .unwrap();
        assert_eq!(by_invoice.total, 1);
        assert_eq!(by_invoice.data[0].id, "PAY-1");

        let by_amount = FilterRequest::new()
            .search("42.5")
            .execute(&payments, &Payment::default_order())
            .unwrap();
        assert_eq!(by_amount.data[0].id, "PAY-2");
    }

    #[test]
    fn currency_defaults_when_absent() {
        let payment: Payment = serde_json::from_value(serde_json::json!({
            "id": "PAY-9",
            "reference": "REF-9",
            "customerName": "Globex",
            "amount": 10,
            "method": "ACH",
            "status": "Matched",
            "receivedAt": "2024-06-01T00:00:00Z",
            "updatedAt": "2024-06-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(payment.currency, "USD");
        assert!(payment.matched_invoices.is_empty());
    }

    #[test]
    fn search_reaches_currency() {
        let mut euro = payment("PAY-1", PaymentStatus::Matched, PaymentMethod::Wire, 10.0);
        euro.currency = "EUR".into();
        let payments = vec![euro, payment("PAY-2", PaymentStatus::Matched, PaymentMethod::Wire, 10.0)];
        let page = FilterRequest::new()
            .search("eur")
            .execute(&payments, &Payment::default_order())
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].id, "PAY-1");
    }
}
