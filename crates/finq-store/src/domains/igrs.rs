//! IGRS cases: registration revenue gaps flagged by detection signals.

use chrono::{DateTime, Utc};
use finq_seeker::{FilterRequest, OrderBy, Seekable, Value};
use serde::{Deserialize, Serialize};

use super::{amount, label_enum, opt_text, time};
use crate::record::{ListOptions, Record, RecordFilter};

label_enum! {
    /// Workflow state of an IGRS case.
    pub enum CaseStatus {
        Open => "Open",
        InReview => "In Review",
        Escalated => "Escalated",
        Resolved => "Resolved",
        Closed => "Closed",
    }
    default Open
}

label_enum! {
    pub enum RiskLevel {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Critical => "Critical",
    }
    default Medium
}

/// A detection rule that fired for a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IgrsCase {
    pub id: String,
    pub title: String,
    pub status: CaseStatus,
    pub risk_level: RiskLevel,
    pub office_code: String,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub document_number: Option<String>,
    pub gap_amount: f64,
    #[serde(default)]
    pub signals: Vec<Signal>,
    #[serde(default)]
    pub notes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl IgrsCase {
    /// Returns `true` if any of the case's signals has one of `codes`.
    pub fn has_any_signal<S: AsRef<str>>(&self, codes: &[S]) -> bool {
        self.signals
            .iter()
            .any(|signal| codes.iter().any(|code| code.as_ref() == signal.code))
    }
}

impl Seekable for IgrsCase {
    const SEARCH_FIELDS: &'static [&'static str] = &[
        "id",
        "title",
        "status",
        "riskLevel",
        "officeCode",
        "assignee",
        "documentNumber",
        "gapAmount",
        "signals",
        "notes",
        "createdAt",
        "updatedAt",
    ];

    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::String(&self.id),
            "title" => Value::String(&self.title),
            "status" => Value::String(self.status.as_str()),
            "riskLevel" => Value::String(self.risk_level.as_str()),
            "officeCode" => Value::String(&self.office_code),
            "assignee" => opt_text(&self.assignee),
            "documentNumber" => opt_text(&self.document_number),
            "gapAmount" => amount(self.gap_amount),
            "signals" => Value::List(
                self.signals
                    .iter()
                    .flat_map(|signal| [&signal.code, &signal.description])
                    .filter(|text| !text.is_empty())
                    .map(|text| Value::String(text))
                    .collect(),
            ),
            "notes" => Value::List(self.notes.iter().map(|note| Value::String(note)).collect()),
            "createdAt" => time(&self.created_at),
            "updatedAt" => time(&self.updated_at),
            _ => Value::None,
        }
    }
}

impl Record for IgrsCase {
    const SOURCE_PATH: &'static str = "/data/igrs/cases.json";
    const ID_PREFIX: &'static str = "IGRS";

    fn id(&self) -> &str {
        &self.id
    }

    fn default_order() -> OrderBy {
        OrderBy::desc("createdAt")
    }

    fn blank(id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: String::new(),
            status: CaseStatus::default(),
            risk_level: RiskLevel::default(),
            office_code: String::new(),
            assignee: None,
            document_number: None,
            gap_amount: 0.0,
            signals: Vec::new(),
            notes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Criteria for listing IGRS cases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IgrsCaseFilter {
    #[serde(flatten)]
    pub options: ListOptions,
    pub status: Vec<String>,
    pub risk_level: Vec<String>,
    pub office_code: Vec<String>,
    pub assignee: Vec<String>,
    /// Signal codes; a case matches when it carries at least one of them.
    pub signals: Vec<String>,
    pub min_gap_amount: Option<f64>,
    pub max_gap_amount: Option<f64>,
}

impl RecordFilter<IgrsCase> for IgrsCaseFilter {
    fn request(&self) -> FilterRequest {
        self.options
            .request()
            .field_in("status", &self.status)
            .field_in("riskLevel", &self.risk_level)
            .field_in("officeCode", &self.office_code)
            .field_in("assignee", &self.assignee)
            .range("gapAmount", self.min_gap_amount, self.max_gap_amount)
    }

    fn matches(&self, case: &IgrsCase) -> bool {
        self.signals.is_empty() || case.has_any_signal(&self.signals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn case(id: &str, status: CaseStatus, gap: f64, signals: &[&str], day: u32) -> IgrsCase {
        let at = Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap();
        IgrsCase {
            status,
            gap_amount: gap,
            office_code: "SRO-12".into(),
            signals: signals
                .iter()
                .map(|code| Signal {
                    code: code.to_string(),
                    description: String::new(),
                })
                .collect(),
            ..IgrsCase::blank(id.to_string(), at)
        }
    }

    #[test]
    fn signal_predicate_matches_any_requested_code() {
        let filter = IgrsCaseFilter {
            signals: vec!["UNDERVALUED".into(), "SPLIT_DEED".into()],
            ..IgrsCaseFilter::default()
        };
        assert!(filter.matches(&case("a", CaseStatus::Open, 1.0, &["SPLIT_DEED"], 1)));
        assert!(!filter.matches(&case("b", CaseStatus::Open, 1.0, &["LATE_FEE"], 1)));
        assert!(!filter.matches(&case("c", CaseStatus::Open, 1.0, &[], 1)));
        assert!(IgrsCaseFilter::default().matches(&case("d", CaseStatus::Open, 1.0, &[], 1)));
    }

    #[test]
    fn filter_runs_every_stage() {
        let cases = vec![
            case("IGRS-1", CaseStatus::Open, 12_000.0, &["UNDERVALUED"], 1),
            case("IGRS-2", CaseStatus::Closed, 90_000.0, &["UNDERVALUED"], 2),
            case("IGRS-3", CaseStatus::InReview, 45_000.0, &["UNDERVALUED", "SPLIT_DEED"], 3),
            case("IGRS-4", CaseStatus::Open, 60_000.0, &["LATE_FEE"], 4),
        ];
        let filter: IgrsCaseFilter = serde_json::from_value(serde_json::json!({
            "status": ["Open", "In Review"],
            "signals": ["UNDERVALUED"],
            "minGapAmount": 10000
        }))
        .unwrap();

        let page = filter
            .request()
            .execute_with(&cases, |c| filter.matches(c), &IgrsCase::default_order())
            .unwrap();
        let ids: Vec<&str> = page.data.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["IGRS-3", "IGRS-1"]);
    }

    #[test]
    fn search_covers_signal_codes_and_labels() {
        let cases = vec![
            case("IGRS-1", CaseStatus::InReview, 1.0, &[], 1),
            case("IGRS-2", CaseStatus::Open, 1.0, &["SPLIT_DEED"], 2),
        ];
        let by_label = FilterRequest::new()
            .search("in review")
            .execute(&cases, &IgrsCase::default_order())
            .unwrap();
        assert_eq!(by_label.data[0].id, "IGRS-1");

        let by_signal = FilterRequest::new()
            .search("split_deed")
            .execute(&cases, &IgrsCase::default_order())
            .unwrap();
        assert_eq!(by_signal.total, 1);
        assert_eq!(by_signal.data[0].id, "IGRS-2");
    }

    #[test]
    fn record_json_uses_camel_case_labels() {
        let json = serde_json::to_value(case("IGRS-9", CaseStatus::InReview, 5.0, &[], 1)).unwrap();
        assert_eq!(json["status"], "In Review");
        assert_eq!(json["riskLevel"], "Medium");
        assert_eq!(json["gapAmount"], 5.0);
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn search_reaches_notes_descriptions_and_amounts() {
        let mut noted = case("IGRS-1", CaseStatus::Open, 48_250.5, &["UNDERVALUED"], 1);
        noted.notes = vec!["Owner disputes the guideline rate".into()];
        noted.signals[0].description = "Below circle value".into();
        let cases = vec![noted, case("IGRS-2", CaseStatus::Open, 900.0, &["UNDERVALUED"], 2)];

        for term in ["guideline rate", "circle value", "48250.5"] {
            let page = FilterRequest::new()
                .search(term)
                .execute(&cases, &IgrsCase::default_order())
                .unwrap();
            assert_eq!(page.total, 1, "term {term:?}");
            assert_eq!(page.data[0].id, "IGRS-1");
        }
    }
}
