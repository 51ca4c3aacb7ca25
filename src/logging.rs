//! Log setup: timestamped lines to stderr and an append-only log file.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use chrono::Local;
use env_logger::{Env, Target};

use crate::error::MailerError;

/// Log file written when no `--log-file` is given
pub const DEFAULT_LOG_FILE: &str = "workout_scheduler.log";

/// Writes every log line to stderr and to the log file
struct LogSink {
    file: File,
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

/// Install the global logger. `RUST_LOG` overrides the default `info` level.
pub fn init_logging(log_file: &Path) -> Result<(), MailerError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| MailerError::LogFile {
            path: log_file.to_path_buf(),
            reason: e.to_string(),
        })?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(LogSink { file })))
        .try_init()
        .map_err(|e| MailerError::LogFile {
            path: log_file.to_path_buf(),
            reason: e.to_string(),
        })
}
