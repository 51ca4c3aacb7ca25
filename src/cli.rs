//! Command line surface
//!
//! `send` (default) runs the pipeline once, `run` stays resident and sends
//! daily, `preview` prints the rendered workout without touching SMTP.

use std::path::PathBuf;

use chrono::Weekday;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::error::MailerError;
use crate::json_loader::DEFAULT_WORKOUTS_FILE;
use crate::logging::DEFAULT_LOG_FILE;
use crate::scheduler::parse_send_time;
use crate::selector::parse_weekday;
use crate::types::ScheduleEntry;

/// What the process was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// One-shot: send today's workout and exit
    Send,
    /// Long-running: send once per day at the scheduled time
    Run(ScheduleEntry),
    /// Print the rendered workout for `weekday` (today when absent)
    Preview { weekday: Option<Weekday>, plain: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub mode: Mode,
    pub workouts: PathBuf,
    pub env_file: Option<PathBuf>,
    pub log_file: PathBuf,
}

pub fn command() -> Command {
    Command::new("workout-mailer")
        .about("Emails today's workout routine through an SMTP relay")
        .arg(
            Arg::new("workouts")
                .long("workouts")
                .value_name("PATH")
                .global(true)
                .default_value(DEFAULT_WORKOUTS_FILE)
                .help("Workout document (JSON with a \"days\" list)"),
        )
        .arg(
            Arg::new("env-file")
                .long("env-file")
                .value_name("PATH")
                .global(true)
                .help("Dotenv file with SMTP settings (default: .env if present)"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .global(true)
                .default_value(DEFAULT_LOG_FILE)
                .help("Append-only log file"),
        )
        .subcommand(Command::new("send").about("Send today's workout once and exit"))
        .subcommand(
            Command::new("run")
                .about("Stay resident and send the workout every day")
                .arg(
                    Arg::new("at")
                        .long("at")
                        .value_name("HH:MM")
                        .default_value("06:00")
                        .help("Local time of day to send"),
                ),
        )
        .subcommand(
            Command::new("preview")
                .about("Print the rendered workout without sending it")
                .arg(
                    Arg::new("weekday")
                        .long("weekday")
                        .value_name("DAY")
                        .help("Weekday name or index 0-6 (Monday = 0); default today"),
                )
                .arg(
                    Arg::new("plain")
                        .long("plain")
                        .action(ArgAction::SetTrue)
                        .help("Print the plain-text part instead of HTML"),
                ),
        )
}

/// Log file path, needed before the rest of the arguments are interpreted
pub fn log_file(matches: &ArgMatches) -> PathBuf {
    path_arg(matches, "log-file").unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
}

/// Interpret parsed arguments
pub fn invocation_from(matches: &ArgMatches) -> Result<Invocation, MailerError> {
    let mode = match matches.subcommand() {
        Some(("run", sub)) => {
            let send_at = match sub.get_one::<String>("at") {
                Some(value) => parse_send_time(value)?,
                None => ScheduleEntry::default_daily().send_at,
            };
            Mode::Run(ScheduleEntry { send_at })
        }
        Some(("preview", sub)) => Mode::Preview {
            weekday: sub
                .get_one::<String>("weekday")
                .map(|value| parse_weekday(value))
                .transpose()?,
            plain: sub.get_flag("plain"),
        },
        _ => Mode::Send,
    };

    Ok(Invocation {
        mode,
        workouts: path_arg(matches, "workouts")
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKOUTS_FILE)),
        env_file: path_arg(matches, "env-file"),
        log_file: log_file(matches),
    })
}

fn path_arg(matches: &ArgMatches, name: &str) -> Option<PathBuf> {
    matches.get_one::<String>(name).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn parse(args: &[&str]) -> Result<Invocation, MailerError> {
        let matches = command().try_get_matches_from(args).expect("valid arguments");
        invocation_from(&matches)
    }

    #[test]
    fn test_defaults_to_one_shot_send() {
        let invocation = parse(&["workout-mailer"]).unwrap();
        assert_eq!(invocation.mode, Mode::Send);
        assert_eq!(invocation.workouts, PathBuf::from(DEFAULT_WORKOUTS_FILE));
        assert_eq!(invocation.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(invocation.env_file, None);
    }

    #[test]
    fn test_run_with_send_time() {
        let invocation = parse(&[
            "workout-mailer",
            "--workouts",
            "plans/strength.json",
            "run",
            "--at",
            "07:30",
        ])
        .unwrap();
        assert_eq!(
            invocation.mode,
            Mode::Run(ScheduleEntry {
                send_at: NaiveTime::from_hms_opt(7, 30, 0).unwrap()
            })
        );
        assert_eq!(invocation.workouts, PathBuf::from("plans/strength.json"));
    }

    #[test]
    fn test_run_defaults_to_six_am() {
        let invocation = parse(&["workout-mailer", "run"]).unwrap();
        assert_eq!(invocation.mode, Mode::Run(ScheduleEntry::default_daily()));
    }

    #[test]
    fn test_run_rejects_bad_time() {
        assert!(matches!(
            parse(&["workout-mailer", "run", "--at", "noon"]),
            Err(MailerError::InvalidSendTime(_))
        ));
    }

    #[test]
    fn test_preview_options() {
        let invocation = parse(&[
            "workout-mailer",
            "preview",
            "--weekday",
            "tuesday",
            "--plain",
            "--env-file",
            "relay.env",
        ])
        .unwrap();
        assert_eq!(
            invocation.mode,
            Mode::Preview {
                weekday: Some(Weekday::Tue),
                plain: true
            }
        );
        assert_eq!(invocation.env_file, Some(PathBuf::from("relay.env")));
    }
}
