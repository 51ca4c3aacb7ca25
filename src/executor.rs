//! Send pipeline
//!
//! load workouts → select today's entry → render → dispatch.
//! Configuration and data errors are returned to the caller; transport
//! failures come back as a `Delivery` value.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Datelike, Local, Weekday};

use crate::error::MailerError;
use crate::json_loader::load_workouts;
use crate::notification::{dispatch, MailTransport};
use crate::render::{render_html, render_plain, subject_line};
use crate::selector::{select_day, weekday_name};
use crate::types::{Config, Delivery, ExecutionTrigger, WorkoutEmail};

/// Load the plan at `workouts_path` and render the entry for `weekday`
pub fn prepare_email(workouts_path: &Path, weekday: Weekday) -> Result<WorkoutEmail, MailerError> {
    let plan = load_workouts(workouts_path)?;
    let (index, day) = select_day(&plan, weekday);
    log::info!(
        "Selected day {} of {} for {}: {}",
        index,
        plan.len(),
        weekday_name(weekday),
        day.title()
    );

    Ok(WorkoutEmail {
        subject: subject_line(day, weekday),
        html: render_html(day),
        plain: render_plain(day),
    })
}

/// Runs the send pipeline against one transport
pub struct Executor {
    workouts_path: PathBuf,
    config: Config,
    transport: Arc<dyn MailTransport>,
}

impl Executor {
    pub fn new(workouts_path: PathBuf, config: Config, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            workouts_path,
            config,
            transport,
        }
    }

    /// Run the full pipeline for the local clock reading `now`
    pub async fn execute(
        &self,
        trigger: ExecutionTrigger,
        now: DateTime<Local>,
    ) -> Result<Delivery, MailerError> {
        log::info!(
            "Running workout pipeline (trigger: {:?}) at {}",
            trigger,
            now.format("%Y-%m-%d %H:%M:%S")
        );
        if let Some(tz) = self.config.report_timezone {
            log::info!(
                "Current time in {}: {}",
                tz,
                now.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S")
            );
        }

        let email = prepare_email(&self.workouts_path, now.weekday())?;
        Ok(dispatch(self.transport.as_ref(), &self.config.smtp, &email).await)
    }
}
