//! Workout document loader
//!
//! Reads the workout JSON fresh on every run. Any problem with the file
//! (missing, unreadable, malformed, no days) is a fatal data error.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::MailerError;
use crate::types::{DayEntry, WorkoutPlan};

/// Default location of the workout document, relative to the working directory
pub const DEFAULT_WORKOUTS_FILE: &str = "workouts.json";

/// On-disk workout document. Only `days` is recognised.
#[derive(Debug, serde::Deserialize)]
pub struct WorkoutDocument {
    #[serde(default)]
    pub days: Option<Vec<DayEntry>>,
}

/// Load and validate the workout plan at `path`
pub fn load_workouts(path: &Path) -> Result<WorkoutPlan, MailerError> {
    log::info!("Loading workouts from {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => MailerError::WorkoutsNotFound(path.to_path_buf()),
        _ => MailerError::IoError(format!("Failed to read {}: {}", path.display(), e)),
    })?;

    let plan = parse_workouts(&content)
        .map_err(|e| match e {
            MailerError::NoWorkouts(_) => MailerError::NoWorkouts(path.to_path_buf()),
            other => other,
        })?;

    log::info!("Loaded {} days of workouts.", plan.len());
    Ok(plan)
}

/// Parse a workout document from a JSON string
pub fn parse_workouts(content: &str) -> Result<WorkoutPlan, MailerError> {
    let document: WorkoutDocument = serde_json::from_str(content)?;
    WorkoutPlan::new(document.days.unwrap_or_default())
        .ok_or_else(|| MailerError::NoWorkouts(Path::new("<inline>").to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEG_DAY: &str = r#"{"days":[{"title":"Leg Day","exercises":[{"name":"Squat","sets":"5x5","rest":"90s","url":"http://example.com/squat"}]}]}"#;

    fn write_doc(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(DEFAULT_WORKOUTS_FILE);
        fs::write(&path, content).expect("write workouts");
        path
    }

    #[test]
    fn test_load_workouts_reads_days() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_doc(&dir, LEG_DAY);

        let plan = load_workouts(&path).unwrap();
        assert_eq!(plan.len(), 1);
        let day = &plan.days()[0];
        assert_eq!(day.title(), "Leg Day");
        assert_eq!(day.exercises[0].name(), "Squat");
        assert_eq!(day.exercises[0].link(), Some("http://example.com/squat"));
    }

    #[test]
    fn test_load_workouts_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nope.json");

        match load_workouts(&path) {
            Err(MailerError::WorkoutsNotFound(p)) => assert_eq!(p, path),
            other => panic!("expected WorkoutsNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_workouts_malformed_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_doc(&dir, "{\"days\": [");

        let err = load_workouts(&path).unwrap_err();
        assert!(matches!(err, MailerError::WorkoutsMalformed(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_load_workouts_wrong_shape_is_malformed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_doc(&dir, r#"{"days": "monday"}"#);

        assert!(matches!(
            load_workouts(&path),
            Err(MailerError::WorkoutsMalformed(_))
        ));
    }

    #[test]
    fn test_load_workouts_empty_days() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_doc(&dir, r#"{"days": []}"#);

        match load_workouts(&path) {
            Err(MailerError::NoWorkouts(p)) => assert_eq!(p, path),
            other => panic!("expected NoWorkouts, got {:?}", other),
        }
    }

    #[test]
    fn test_load_workouts_missing_days_key() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_doc(&dir, r#"{"weeks": []}"#);

        assert!(matches!(
            load_workouts(&path),
            Err(MailerError::NoWorkouts(_))
        ));
    }

    #[test]
    fn test_parse_workouts_ignores_unknown_keys() {
        let plan = parse_workouts(r#"{"version": 2, "days": [{"title": "Rest"}]}"#).unwrap();
        assert_eq!(plan.days()[0].title(), "Rest");
        assert!(plan.days()[0].exercises.is_empty());
    }
}
