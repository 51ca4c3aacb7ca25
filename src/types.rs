use std::fmt;

use chrono::NaiveTime;
use chrono_tz::Tz;
use lettre::message::Mailbox;
use serde::{Deserialize, Deserializer};

/// Placeholder title for a day-entry without one
pub const DEFAULT_TITLE: &str = "Workout";

/// Placeholder name for an exercise without one
pub const DEFAULT_EXERCISE_NAME: &str = "Unknown Exercise";

/// One titled set of exercises, corresponding to one weekday
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DayEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl DayEntry {
    /// Display title, falling back to the placeholder
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }
}

/// A single exercise line in a day-entry.
///
/// `sets` and `rest` are free-form in the source document (string or number);
/// both are normalised to their textual form on load.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Exercise {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "free_form")]
    pub sets: String,
    #[serde(default, deserialize_with = "free_form")]
    pub rest: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl Exercise {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_EXERCISE_NAME)
    }

    /// Hyperlink target, if present and non-empty
    pub fn link(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

/// Accepts a string, number or boolean and keeps its textual form; null is empty.
fn free_form<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// The validated, non-empty list of day-entries
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutPlan {
    days: Vec<DayEntry>,
}

impl WorkoutPlan {
    /// Returns `None` for an empty list; a plan always has at least one day.
    pub fn new(days: Vec<DayEntry>) -> Option<Self> {
        if days.is_empty() {
            None
        } else {
            Some(Self { days })
        }
    }

    pub fn days(&self) -> &[DayEntry] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Relay connection and credential parameters
#[derive(Clone)]
pub struct SmtpSettings {
    pub server: String,
    pub port: u16,
    pub sender: Mailbox,
    pub password: String,
    pub recipient: Mailbox,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("sender", &self.sender.to_string())
            .field("password", &"<redacted>")
            .field("recipient", &self.recipient.to_string())
            .finish()
    }
}

/// Immutable runtime configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub smtp: SmtpSettings,
    /// Timezone for the informational "current time" log line
    pub report_timezone: Option<Tz>,
}

/// Daily trigger for the long-running variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub send_at: NaiveTime,
}

impl ScheduleEntry {
    /// Default schedule: 6 AM local time
    pub fn default_daily() -> Self {
        Self {
            send_at: NaiveTime::from_hms_opt(6, 0, 0).unwrap_or_default(),
        }
    }
}

impl Default for ScheduleEntry {
    fn default() -> Self {
        Self::default_daily()
    }
}

/// What triggered a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionTrigger {
    Scheduled,
    Manual,
}

/// A rendered workout, ready to be put into a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutEmail {
    pub subject: String,
    pub html: String,
    pub plain: String,
}

/// Outcome of one delivery attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_accepts_numbers_for_free_form_fields() {
        let ex: Exercise =
            serde_json::from_str(r#"{"name":"Row","sets":3,"rest":2.5}"#).unwrap();
        assert_eq!(ex.sets, "3");
        assert_eq!(ex.rest, "2.5");
        assert_eq!(ex.link(), None);
    }

    #[test]
    fn test_exercise_missing_fields_default_to_empty() {
        let ex: Exercise = serde_json::from_str(r#"{"sets":null}"#).unwrap();
        assert_eq!(ex.name(), DEFAULT_EXERCISE_NAME);
        assert_eq!(ex.sets, "");
        assert_eq!(ex.rest, "");
    }

    #[test]
    fn test_blank_url_is_not_a_link() {
        let ex = Exercise {
            url: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(ex.link(), None);
    }

    #[test]
    fn test_day_entry_title_placeholder() {
        assert_eq!(DayEntry::default().title(), DEFAULT_TITLE);
    }

    #[test]
    fn test_plan_rejects_empty_list() {
        assert!(WorkoutPlan::new(Vec::new()).is_none());
        assert_eq!(WorkoutPlan::new(vec![DayEntry::default()]).unwrap().len(), 1);
    }

    #[test]
    fn test_smtp_settings_debug_hides_password() {
        let settings = SmtpSettings {
            server: "smtp.example.com".to_string(),
            port: 587,
            sender: "coach@example.com".parse().unwrap(),
            password: "hunter2".to_string(),
            recipient: "athlete@example.com".parse().unwrap(),
        };
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
