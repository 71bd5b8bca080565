//! Append-only audit trail of user actions.

use chrono::{DateTime, Utc};
use finq_seeker::{FilterRequest, OrderBy, Seekable, Value};
use serde::{Deserialize, Serialize};

use super::{opt_text, time};
use crate::record::{new_id, ListOptions, Record, RecordFilter};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub actor: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
}

/// Caller-supplied part of an audit entry; id and timestamp are assigned on
/// append.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAuditEntry {
    pub actor: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
}

impl NewAuditEntry {
    pub fn new(
        actor: impl Into<String>,
        action: impl Into<String>,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        Self {
            actor: actor.into(),
            action: action.into(),
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            details: None,
            ip_address: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Stamps the entry with a fresh id and `now`.
    pub fn into_entry(self, now: DateTime<Utc>) -> AuditEntry {
        AuditEntry {
            id: new_id(AuditEntry::ID_PREFIX),
            timestamp: now,
            actor: self.actor,
            action: self.action,
            entity_type: self.entity_type,
            entity_id: self.entity_id,
            details: self.details,
            ip_address: self.ip_address,
        }
    }
}

impl Seekable for AuditEntry {
    const SEARCH_FIELDS: &'static [&'static str] = &[
        "id",
        "timestamp",
        "actor",
        "action",
        "entityType",
        "entityId",
        "details",
        "ipAddress",
    ];

    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::String(&self.id),
            "timestamp" => time(&self.timestamp),
            "actor" => Value::String(&self.actor),
            "action" => Value::String(&self.action),
            "entityType" => Value::String(&self.entity_type),
            "entityId" => Value::String(&self.entity_id),
            "details" => opt_text(&self.details),
            "ipAddress" => opt_text(&self.ip_address),
            _ => Value::None,
        }
    }
}

impl Record for AuditEntry {
    const SOURCE_PATH: &'static str = "/data/audit/logs.json";
    const ID_PREFIX: &'static str = "AUD";

    fn id(&self) -> &str {
        &self.id
    }

    fn default_order() -> OrderBy {
        OrderBy::desc("timestamp")
    }

    fn blank(id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            timestamp: now,
            actor: String::new(),
            action: String::new(),
            entity_type: String::new(),
            entity_id: String::new(),
            details: None,
            ip_address: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuditFilter {
    #[serde(flatten)]
    pub options: ListOptions,
    pub actor: Vec<String>,
    pub action: Vec<String>,
    pub entity_type: Vec<String>,
    /// Exact id of the entity the entries refer to.
    pub entity_id: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl RecordFilter<AuditEntry> for AuditFilter {
    fn request(&self) -> FilterRequest {
        let millis = |at: &DateTime<Utc>| at.timestamp_millis() as f64;
        self.options
            .request()
            .field_in("actor", &self.actor)
            .field_in("action", &self.action)
            .field_in("entityType", &self.entity_type)
            .range(
                "timestamp",
                self.from.as_ref().map(millis),
                self.to.as_ref().map(millis),
            )
    }

    fn matches(&self, entry: &AuditEntry) -> bool {
        self.entity_id
            .as_deref()
            .map_or(true, |id| entry.entity_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(id: &str, entity_id: &str, hour: u32) -> AuditEntry {
        AuditEntry {
            id: id.into(),
            entity_id: entity_id.into(),
            entity_type: "IgrsCase".into(),
            actor: "priya".into(),
            action: "update".into(),
            ..AuditEntry::blank(id.into(), Utc.with_ymd_and_hms(2024, 7, 1, hour, 0, 0).unwrap())
        }
    }

    #[test]
    fn entity_and_time_window() {
        let entries = vec![
            entry("AUD-1", "IGRS-1", 8),
            entry("AUD-2", "IGRS-2", 9),
            entry("AUD-3", "IGRS-1", 10),
            entry("AUD-4", "IGRS-1", 12),
        ];
        let filter: AuditFilter = serde_json::from_value(serde_json::json!({
            "entityId": "IGRS-1",
            "from": "2024-07-01T09:00:00Z",
            "to": "2024-07-01T12:00:00Z"
        }))
        .unwrap();

        let page = filter
            .request()
            .execute_with(&entries, |e| filter.matches(e), &AuditEntry::default_order())
            .unwrap();
        let ids: Vec<&str> = page.data.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["AUD-4", "AUD-3"]);
    }

    #[test]
    fn new_entry_is_stamped() {
        let now = Utc::now();
        let entry = NewAuditEntry::new("sam", "delete", "CloseTask", "TASK-3")
            .with_details("removed duplicate")
            .into_entry(now);
        assert!(entry.id.starts_with("AUD-"));
        assert_eq!(entry.timestamp, now);
        assert_eq!(entry.details.as_deref(), Some("removed duplicate"));
    }

    #[test]
    fn search_reaches_ip_address() {
        let mut remote = entry("AUD-1", "IGRS-1", 8);
        remote.ip_address = Some("10.20.30.40".into());
        let entries = vec![remote, entry("AUD-2", "IGRS-1", 9)];
        let page = FilterRequest::new()
            .search("10.20.30.40")
            .execute(&entries, &AuditEntry::default_order())
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].id, "AUD-1");
    }
}
