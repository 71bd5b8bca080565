//! Month-end close checklist tasks.

use chrono::{DateTime, Utc};
use finq_seeker::{FilterRequest, OrderBy, Seekable, Value};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use super::{label_enum, opt_text, opt_time, time, Priority};
use crate::record::{ListOptions, Record, RecordFilter};

label_enum! {
    pub enum TaskStatus {
        NotStarted => "Not Started",
        InProgress => "In Progress",
        InReview => "In Review",
        Blocked => "Blocked",
        Completed => "Completed",
    }
    default NotStarted
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseTask {
    pub id: String,
    pub title: String,
    pub category: String,
    pub status: TaskStatus,
    pub priority: Priority,
    #[serde(default)]
    pub assignee: Option<String>,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CloseTask {
    /// Past due and not yet completed as of `now`.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != TaskStatus::Completed && self.due_date < now
    }
}

impl Seekable for CloseTask {
    const SEARCH_FIELDS: &'static [&'static str] = &[
        "id",
        "title",
        "category",
        "status",
        "priority",
        "assignee",
        "dueDate",
        "completedAt",
        "dependencies",
        "createdAt",
        "updatedAt",
    ];

    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::String(&self.id),
            "title" => Value::String(&self.title),
            "category" => Value::String(&self.category),
            "status" => Value::String(self.status.as_str()),
            "priority" => Value::String(self.priority.as_str()),
            "assignee" => opt_text(&self.assignee),
            "dueDate" => time(&self.due_date),
            "completedAt" => opt_time(&self.completed_at),
            "dependencies" => Value::List(
                self.dependencies
                    .iter()
                    .map(|task| Value::String(task.as_str()))
                    .collect(),
            ),
            "createdAt" => time(&self.created_at),
            "updatedAt" => time(&self.updated_at),
            _ => Value::None,
        }
    }
}

impl Record for CloseTask {
    const SOURCE_PATH: &'static str = "/data/close/tasks.json";
    const ID_PREFIX: &'static str = "TASK";

    fn id(&self) -> &str {
        &self.id
    }

    fn default_order() -> OrderBy {
        OrderBy::asc("dueDate")
    }

    fn blank(id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: String::new(),
            category: "General".to_string(),
            status: TaskStatus::default(),
            priority: Priority::default(),
            assignee: None,
            due_date: now,
            completed_at: None,
            dependencies: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// A status change without an explicit `completedAt` stamps or clears it.
    fn fill_derived(&mut self, patch: &Map<String, Json>, now: DateTime<Utc>) {
        if !patch.contains_key("status") || patch.contains_key("completedAt") {
            return;
        }
        match self.status {
            TaskStatus::Completed => {
                self.completed_at.get_or_insert(now);
            }
            _ => self.completed_at = None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CloseTaskFilter {
    #[serde(flatten)]
    pub options: ListOptions,
    pub status: Vec<String>,
    pub category: Vec<String>,
    pub assignee: Vec<String>,
    pub priority: Vec<String>,
    /// Keep only tasks past their due date and not completed.
    pub overdue: bool,
}

impl RecordFilter<CloseTask> for CloseTaskFilter {
    fn request(&self) -> FilterRequest {
        self.options
            .request()
            .field_in("status", &self.status)
            .field_in("category", &self.category)
            .field_in("assignee", &self.assignee)
            .field_in("priority", &self.priority)
    }

    fn matches(&self, task: &CloseTask) -> bool {
        !self.overdue || task.is_overdue(Utc::now())
    }
}
