//! Startup configuration
//!
//! Reads the five required SMTP variables (and the optional
//! `REPORT_TIMEZONE`) into an immutable `Config`. A dotenv file may supply
//! values; variables already set in the process environment take precedence.
//! The process environment itself is never modified.

use std::collections::HashMap;
use std::path::Path;

use chrono_tz::Tz;
use lettre::message::Mailbox;

use crate::error::MailerError;
use crate::types::{Config, SmtpSettings};

pub const SMTP_SERVER: &str = "SMTP_SERVER";
pub const SMTP_PORT: &str = "SMTP_PORT";
pub const EMAIL_ADDRESS: &str = "EMAIL_ADDRESS";
pub const EMAIL_PASSWORD: &str = "EMAIL_PASSWORD";
pub const RECIPIENT_EMAIL: &str = "RECIPIENT_EMAIL";
pub const REPORT_TIMEZONE: &str = "REPORT_TIMEZONE";

/// Dotenv file read when no explicit one is given
pub const DEFAULT_ENV_FILE: &str = ".env";

const REQUIRED: [&str; 5] = [
    SMTP_SERVER,
    SMTP_PORT,
    EMAIL_ADDRESS,
    EMAIL_PASSWORD,
    RECIPIENT_EMAIL,
];

/// Load configuration from the process environment layered over a dotenv file.
///
/// With `env_file = None` the default `.env` is used if it exists; an
/// explicit path that does not exist is an error.
pub fn load_config(env_file: Option<&Path>) -> Result<Config, MailerError> {
    let mut vars = match env_file {
        Some(path) => read_env_file(path)?,
        None => {
            let default = Path::new(DEFAULT_ENV_FILE);
            if default.exists() {
                read_env_file(default)?
            } else {
                HashMap::new()
            }
        }
    };
    overlay_env(&mut vars, |name| std::env::var(name).ok());

    config_from_vars(&vars)
}

/// Overlay the variables this app reads from `lookup` onto `vars`.
///
/// Only known names are queried, so unrelated (possibly non-UTF-8) process
/// variables are never touched. Empty values do not replace file values.
fn overlay_env<F>(vars: &mut HashMap<String, String>, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    for name in REQUIRED.into_iter().chain([REPORT_TIMEZONE]) {
        if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
            vars.insert(name.to_string(), value);
        }
    }
}

/// Read `KEY=value` pairs from a dotenv file without exporting them
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>, MailerError> {
    let iter = dotenvy::from_path_iter(path).map_err(|e| {
        if e.not_found() {
            MailerError::EnvFileNotFound(path.to_path_buf())
        } else {
            MailerError::EnvFile(e.to_string())
        }
    })?;

    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(|e| MailerError::EnvFile(e.to_string()))?;
        vars.insert(key, value);
    }
    log::info!("Read {} values from {}", vars.len(), path.display());
    Ok(vars)
}

/// Build a `Config` from a variable map. Empty values count as missing.
pub fn config_from_vars(vars: &HashMap<String, String>) -> Result<Config, MailerError> {
    let get = |name: &str| lookup(vars, name);

    let missing: Vec<String> = REQUIRED
        .into_iter()
        .filter(|name| lookup(vars, name).is_none())
        .map(String::from)
        .collect();
    if !missing.is_empty() {
        return Err(MailerError::MissingConfig(missing));
    }

    let port_raw = get(SMTP_PORT).unwrap_or_default();
    let port = port_raw
        .parse::<u16>()
        .ok()
        .filter(|p| *p != 0)
        .ok_or_else(|| MailerError::InvalidPort(port_raw.to_string()))?;

    let sender = parse_mailbox(EMAIL_ADDRESS, get(EMAIL_ADDRESS).unwrap_or_default())?;
    let recipient = parse_mailbox(RECIPIENT_EMAIL, get(RECIPIENT_EMAIL).unwrap_or_default())?;

    let report_timezone = get(REPORT_TIMEZONE)
        .map(|name| {
            name.parse::<Tz>()
                .map_err(|_| MailerError::InvalidTimezone(name.to_string()))
        })
        .transpose()?;

    Ok(Config {
        smtp: SmtpSettings {
            server: get(SMTP_SERVER).unwrap_or_default().to_string(),
            port,
            sender,
            // Passwords are taken verbatim, surrounding spaces included.
            password: vars.get(EMAIL_PASSWORD).cloned().unwrap_or_default(),
            recipient,
        },
        report_timezone,
    })
}

fn lookup<'a>(vars: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    vars.get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn parse_mailbox(var: &'static str, value: &str) -> Result<Mailbox, MailerError> {
    value.parse::<Mailbox>().map_err(|_| MailerError::InvalidAddress {
        var,
        value: value.to_string(),
    })
}
