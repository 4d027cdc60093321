use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Timestamp layout written to the history file (local time, microseconds).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// One persisted goal row. A single submission produces one record per
/// suggested goal; siblings share `timestamp`, `text` and `emotion`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckinRecord {
    pub timestamp: String,  // ⇔ history.timestamp (ISO-8601, local)
    pub text: String,       // ⇔ history.text (raw user input)
    pub emotion: String,    // ⇔ history.emotion (classified label)
    pub goal: String,       // ⇔ history.goal
    pub completed: bool,    // ⇔ history.completed (false → true only)
    pub id: Uuid,           // ⇔ history.id (stable identity)
}

impl CheckinRecord {
    pub fn new(timestamp: &str, text: &str, emotion: &str, goal: &str) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            text: text.to_string(),
            emotion: emotion.to_string(),
            goal: goal.to_string(),
            completed: false,
            id: Uuid::new_v4(),
        }
    }

    /// Parsed timestamp, `None` when the stored value is not a valid
    /// ISO-8601 date-time.
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.timestamp)
    }

    /// First eight hex digits of the id, enough to pick a goal on the CLI.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }

    /// Flip to completed. Never goes back.
    pub fn complete(&mut self) {
        self.completed = true;
    }
}

/// Current local time in the history file layout.
pub fn now_timestamp() -> String {
    Local::now().naive_local().format(TIMESTAMP_FORMAT).to_string()
}

/// Lenient timestamp parsing: accepts our own layout, seconds-only values,
/// date + minutes, and RFC 3339 with an offset.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.naive_local())
}

/// Raw CSV row as found on disk. Older files may lack `id` and `completed`.
#[derive(Debug, Deserialize)]
pub(crate) struct CheckinRow {
    pub timestamp: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub emotion: String,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub completed: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

impl CheckinRow {
    /// Convert into a record. Rows without a usable id get a fresh one; the
    /// flag is `true` when that happened and the row must be written back.
    pub(crate) fn into_record(self) -> (CheckinRecord, bool) {
        let parsed = self
            .id
            .as_deref()
            .and_then(|s| Uuid::parse_str(s.trim()).ok());
        let assigned = parsed.is_none();

        let record = CheckinRecord {
            timestamp: self.timestamp,
            text: self.text,
            emotion: self.emotion,
            goal: self.goal,
            completed: parse_flag(self.completed.as_deref()),
            id: parsed.unwrap_or_else(Uuid::new_v4),
        };
        (record, assigned)
    }
}

fn parse_flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|s| s.trim().to_ascii_lowercase()).as_deref(),
        Some("true") | Some("1") | Some("yes")
    )
}
