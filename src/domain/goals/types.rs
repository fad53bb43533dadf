use super::lenient;
use super::priority::Priority;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_STATUS: &str = "active";
pub const DEFAULT_PRIORITY: &str = "medium";

/// A trackable target, possibly rolled up into an objective.
///
/// Every field tolerates being absent, `null` or of the wrong type on the wire:
/// progress becomes 0, status `"active"` and priority `"medium"`. Numeric
/// strings are accepted for progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::progress")]
    pub progress_percentage: f64,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub due_date: Option<String>,
    #[serde(default = "default_status", deserialize_with = "status_or_default")]
    pub status: String,
    #[serde(default = "default_priority", deserialize_with = "priority_or_default")]
    pub priority: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_id: Option<String>,
    #[serde(
        default,
        rename = "linkedObjective",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub linked_objective: Option<String>,
}

impl Goal {
    pub fn new(id: impl Into<String>, title: impl Into<String>, progress_percentage: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            progress_percentage,
            due_date: None,
            status: default_status(),
            priority: default_priority(),
            parent_id: None,
            linked_objective: None,
        }
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_linked_objective(mut self, objective_id: impl Into<String>) -> Self {
        self.linked_objective = Some(objective_id.into());
        self
    }

    pub fn priority(&self) -> Priority {
        Priority::from_label(&self.priority)
    }

    /// A goal counts as aligned when it names a parent or a linked objective.
    /// Empty strings do not count.
    pub fn is_aligned(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.parent_id) || present(&self.linked_objective)
    }

    /// Calendar date of the deadline, if one is set and parseable.
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date.as_deref().and_then(parse_due_date)
    }
}

/// A higher-level strategic target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::progress")]
    pub progress_percentage: f64,
}

impl Objective {
    pub fn new(id: impl Into<String>, title: impl Into<String>, progress_percentage: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            progress_percentage,
        }
    }
}

/// Accepts `YYYY-MM-DD`, RFC 3339 and offset-less ISO datetimes.
/// Timestamps carrying an offset are converted to UTC first.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc().date());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

fn default_priority() -> String {
    DEFAULT_PRIORITY.to_string()
}

fn status_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient::label_or(deserializer, DEFAULT_STATUS)
}

fn priority_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient::label_or(deserializer, DEFAULT_PRIORITY)
}
