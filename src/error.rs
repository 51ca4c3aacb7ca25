//! Error types for the workout mailer
//!
//! Errors are classified by how the process reacts:
//! - Fatal: configuration and workout data problems, reported before any mail is sent
//! - Recoverable: transport failures, logged by the dispatcher and never propagated

use std::path::PathBuf;
use thiserror::Error;

/// Error types for loading, rendering and delivering a workout
#[derive(Debug, Error)]
pub enum MailerError {
    // Configuration errors
    #[error("Missing environment variables: {}", .0.join(", "))]
    MissingConfig(Vec<String>),

    #[error("Invalid SMTP_PORT value: {0}")]
    InvalidPort(String),

    #[error("Invalid email address in {var}: {value}")]
    InvalidAddress { var: &'static str, value: String },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid send time '{0}', expected HH:MM")]
    InvalidSendTime(String),

    #[error("Invalid weekday '{0}'")]
    InvalidWeekday(String),

    #[error("Env file not found: {0}")]
    EnvFileNotFound(PathBuf),

    #[error("Failed to parse env file: {0}")]
    EnvFile(String),

    // Data errors
    #[error("JSON file not found at {0}")]
    WorkoutsNotFound(PathBuf),

    #[error("Error decoding JSON: {0}")]
    WorkoutsMalformed(String),

    #[error("No workouts found in {0}")]
    NoWorkouts(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Failed to open log file {path}: {reason}")]
    LogFile { path: PathBuf, reason: String },

    // Delivery errors
    #[error("Failed to build message: {0}")]
    MessageBuild(String),

    #[error("SMTP error when sending email: {0}")]
    Transport(String),
}

impl MailerError {
    /// Returns true if the process must stop when this error surfaces
    pub fn is_fatal(&self) -> bool {
        !matches!(self, MailerError::Transport(_))
    }

    /// Get a user-friendly recovery suggestion
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MailerError::MissingConfig(_) => {
                "Set SMTP_SERVER, SMTP_PORT, EMAIL_ADDRESS, EMAIL_PASSWORD and RECIPIENT_EMAIL."
            }
            MailerError::InvalidPort(_) => "SMTP_PORT must be a number between 1 and 65535.",
            MailerError::InvalidAddress { .. } => "Use a plain address such as name@example.com.",
            MailerError::InvalidTimezone(_) => "Use an IANA timezone name such as US/Eastern.",
            MailerError::InvalidSendTime(_) => "Pass the send time as HH:MM, e.g. 06:00.",
            MailerError::InvalidWeekday(_) => "Use a weekday name (monday) or index 0-6.",
            MailerError::EnvFileNotFound(_) => "Check the --env-file path.",
            MailerError::EnvFile(_) => "Each line of the env file must be KEY=value.",
            MailerError::WorkoutsNotFound(_) => "Check the --workouts path.",
            MailerError::WorkoutsMalformed(_) => "Check the workout file is valid JSON.",
            MailerError::NoWorkouts(_) => "Add at least one entry to the \"days\" list.",
            MailerError::IoError(_) => "Check file permissions and disk space.",
            MailerError::LogFile { .. } => "Check the --log-file path is writable.",
            MailerError::MessageBuild(_) => "Check the sender and recipient addresses.",
            MailerError::Transport(_) => "Check the relay host, port and credentials.",
        }
    }
}

impl From<std::io::Error> for MailerError {
    fn from(err: std::io::Error) -> Self {
        MailerError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for MailerError {
    fn from(err: serde_json::Error) -> Self {
        MailerError::WorkoutsMalformed(err.to_string())
    }
}

impl From<lettre::error::Error> for MailerError {
    fn from(err: lettre::error::Error) -> Self {
        MailerError::MessageBuild(err.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for MailerError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        MailerError::Transport(err.to_string())
    }
}
