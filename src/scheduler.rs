//! Daily scheduler for the long-running variant
//!
//! Fires the send pipeline once per calendar day at a configured local time:
//! - Sleeps toward an absolute fire time, waking at least once per minute
//! - Skips (does not catch up) an occurrence missed by more than the grace period
//! - Transport failures are logged and the loop waits for the next day

use std::time::Duration;

use chrono::{DateTime, Local, NaiveTime, TimeZone};

use crate::error::MailerError;
use crate::executor::Executor;
use crate::types::{Delivery, ExecutionTrigger, ScheduleEntry};

/// Poll interval for scheduler loop (1 minute)
const POLL_INTERVAL_SECS: u64 = 60;

/// How late a fire may start before the occurrence counts as missed (2 minutes)
const MISSED_FIRE_GRACE_SECS: i64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Waiting,
    Firing,
}

/// Parse a send time given as `HH:MM`
pub fn parse_send_time(value: &str) -> Result<NaiveTime, MailerError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| MailerError::InvalidSendTime(value.to_string()))
}

/// First local instant strictly after `now` whose wall-clock time is `send_at`.
///
/// When `send_at` falls in a DST gap the fire moves to the first valid
/// instant after it; when it is ambiguous the earlier instant is used.
pub fn next_fire_after(now: DateTime<Local>, send_at: NaiveTime) -> DateTime<Local> {
    let mut date = now.date_naive();
    loop {
        let wall = date.and_time(send_at);
        let fire = Local
            .from_local_datetime(&wall)
            .earliest()
            .or_else(|| {
                Local
                    .from_local_datetime(&(wall + chrono::Duration::hours(1)))
                    .earliest()
            });
        if let Some(fire) = fire {
            if fire > now {
                return fire;
            }
        }
        date = match date.succ_opt() {
            Some(next) => next,
            None => return now + chrono::Duration::days(1),
        };
    }
}

/// Drives the pipeline once per day
pub struct Scheduler {
    executor: Executor,
    schedule: ScheduleEntry,
    state: SchedulerState,
    next_fire: DateTime<Local>,
}

impl Scheduler {
    pub fn new(executor: Executor, schedule: ScheduleEntry, now: DateTime<Local>) -> Self {
        let next_fire = next_fire_after(now, schedule.send_at);
        Self {
            executor,
            schedule,
            state: SchedulerState::Waiting,
            next_fire,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn next_fire(&self) -> DateTime<Local> {
        self.next_fire
    }

    /// Start the scheduler loop
    ///
    /// Runs until the process is terminated; returns only on a fatal
    /// configuration or data error.
    pub async fn run(mut self) -> Result<(), MailerError> {
        log::info!(
            "Scheduling daily workout at {}. Next send: {}. Now entering loop...",
            self.schedule.send_at.format("%H:%M"),
            self.next_fire.format("%Y-%m-%d %H:%M")
        );

        loop {
            let wait = self.tick(Local::now()).await?;
            tokio::time::sleep(wait).await;
        }
    }

    /// One scheduler step at clock reading `now`; returns how long to sleep.
    pub async fn tick(&mut self, now: DateTime<Local>) -> Result<Duration, MailerError> {
        if now < self.next_fire {
            return Ok(self.wait_from(now));
        }

        let late_secs = (now - self.next_fire).num_seconds();
        if late_secs > MISSED_FIRE_GRACE_SECS {
            log::warn!(
                "Missed scheduled send at {} (woke {} seconds late), skipping to the next day",
                self.next_fire.format("%Y-%m-%d %H:%M"),
                late_secs
            );
        } else {
            self.state = SchedulerState::Firing;
            let result = self.executor.execute(ExecutionTrigger::Scheduled, now).await;
            self.state = SchedulerState::Waiting;

            if let Delivery::Failed(reason) = result? {
                log::warn!("Scheduled send failed ({}), waiting for the next day", reason);
            }
        }

        self.next_fire = next_fire_after(now, self.schedule.send_at);
        log::info!(
            "Next workout email scheduled for {}",
            self.next_fire.format("%Y-%m-%d %H:%M")
        );
        Ok(self.wait_from(now))
    }

    fn wait_from(&self, now: DateTime<Local>) -> Duration {
        let remaining = (self.next_fire - now).to_std().unwrap_or_default();
        remaining.min(Duration::from_secs(POLL_INTERVAL_SECS))
    }
}
