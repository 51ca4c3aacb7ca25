pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod json_loader;
pub mod logging;
pub mod notification;
pub mod render;
pub mod scheduler;
pub mod selector;
pub mod types;

use std::process::ExitCode;
use std::sync::Arc;

use chrono::{Datelike, Local};

use cli::{Invocation, Mode};
use error::MailerError;
use executor::{prepare_email, Executor};
use notification::SmtpRelay;
use scheduler::Scheduler;
use types::{Delivery, ExecutionTrigger};

pub fn run() -> ExitCode {
    let matches = cli::command().get_matches();

    let log_file = cli::log_file(&matches);
    if let Err(e) = logging::init_logging(&log_file) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }
    log::info!("Daily workout mailer started.");

    let outcome = cli::invocation_from(&matches).and_then(execute);
    match outcome {
        Ok(code) => code,
        Err(e) => {
            if e.is_fatal() {
                log::error!("{}", e);
            } else {
                log::warn!("{}", e);
            }
            log::info!("{}", e.recovery_suggestion());
            ExitCode::FAILURE
        }
    }
}

fn execute(invocation: Invocation) -> Result<ExitCode, MailerError> {
    match invocation.mode {
        Mode::Preview { weekday, plain } => {
            let weekday = weekday.unwrap_or_else(|| Local::now().weekday());
            let email = prepare_email(&invocation.workouts, weekday)?;
            println!("Subject: {}\n", email.subject);
            if plain {
                print!("{}", email.plain);
            } else {
                print!("{}", email.html);
            }
            Ok(ExitCode::SUCCESS)
        }
        Mode::Send => {
            let config = config::load_config(invocation.env_file.as_deref())?;
            let transport = Arc::new(SmtpRelay::new(config.smtp.clone()));
            let executor = Executor::new(invocation.workouts, config, transport);

            let runtime = current_thread_runtime()?;
            let delivery =
                runtime.block_on(executor.execute(ExecutionTrigger::Manual, Local::now()))?;
            Ok(exit_code(&delivery))
        }
        Mode::Run(schedule) => {
            let config = config::load_config(invocation.env_file.as_deref())?;
            // Fail fast on a bad workout file instead of at the first send
            json_loader::load_workouts(&invocation.workouts)?;

            let transport = Arc::new(SmtpRelay::new(config.smtp.clone()));
            let executor = Executor::new(invocation.workouts, config, transport);
            let scheduler = Scheduler::new(executor, schedule, Local::now());

            let runtime = current_thread_runtime()?;
            runtime.block_on(scheduler.run())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Process status for a one-shot delivery
fn exit_code(delivery: &Delivery) -> ExitCode {
    match delivery {
        Delivery::Sent => ExitCode::SUCCESS,
        Delivery::Failed(_) => ExitCode::FAILURE,
    }
}

fn current_thread_runtime() -> Result<tokio::runtime::Runtime, MailerError> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
