//! Logging utilities and structured logging support
//!
//! The engine logs through the `log` facade. [`init`] installs an `env_logger`
//! backend configured from [`LoggingConfig`]: a global level, per-tag levels
//! (a tag is a log target such as `bge_engine::actors`), output destinations,
//! and a cap on message length.

use crate::config::LoggingConfig;
use crate::foundation::utils::system_time_string;
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub use log::{debug, error, info, trace, warn};

bitflags::bitflags! {
    /// Where log output is written
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DisplayFlags: u8 {
        /// Append to the log file
        const FILE = 0x01;
        /// Write to standard error
        const CONSOLE = 0x02;
    }
}

impl DisplayFlags {
    /// Build flags from the two config switches
    pub fn from_config(config: &LoggingConfig) -> Self {
        let mut flags = Self::empty();
        flags.set(Self::FILE, config.file_output);
        flags.set(Self::CONSOLE, config.console_output);
        flags
    }
}

/// Logging setup errors
#[derive(Error, Debug)]
pub enum LoggingError {
    /// Level string is not a known log level
    #[error("Unknown log level '{0}'")]
    InvalidLevel(String),

    /// Log file could not be opened
    #[error("Cannot open log file {path}: {source}")]
    File {
        /// Log file path
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },

    /// A global logger is already installed
    #[error("Logger already initialized: {0}")]
    AlreadyInitialized(#[from] log::SetLoggerError),
}

/// Initialize the logging system
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let mut builder = builder(config)?;
    builder.try_init()?;
    log::debug!(
        "Logging initialized (level={}, flags={:?})",
        config.level,
        DisplayFlags::from_config(config)
    );
    Ok(())
}

/// Build an `env_logger` builder for the configuration without installing it
pub fn builder(config: &LoggingConfig) -> Result<Builder, LoggingError> {
    let mut builder = Builder::new();
    builder.filter_level(parse_level(&config.level)?);
    for (tag, level) in &config.tags {
        builder.filter_module(tag, parse_level(level)?);
    }

    let max_length = config.max_message_length;
    builder.format(move |buf, record| {
        let message = record.args().to_string();
        writeln!(
            buf,
            "[{} {:<5} {}] {}",
            buf.timestamp(),
            record.level(),
            record.target(),
            truncate_message(&message, max_length)
        )
    });

    let flags = DisplayFlags::from_config(config);
    if flags.contains(DisplayFlags::FILE) {
        let path = log_file_path(config);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LoggingError::File { path: path.clone(), source })?;

        let writer: Box<dyn Write + Send> = if flags.contains(DisplayFlags::CONSOLE) {
            Box::new(TeeWriter { file })
        } else {
            Box::new(file)
        };
        builder.target(Target::Pipe(writer));
    } else if flags.contains(DisplayFlags::CONSOLE) {
        builder.target(Target::Stderr);
    } else {
        builder.filter_level(LevelFilter::Off);
    }

    Ok(builder)
}

/// Parse a level name such as `"info"` or `"off"`
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    LevelFilter::from_str(level.trim()).map_err(|_| LoggingError::InvalidLevel(level.to_string()))
}

/// Cut a message to at most `max_length` characters (0 keeps everything)
pub fn truncate_message(message: &str, max_length: usize) -> &str {
    if max_length == 0 {
        return message;
    }
    match message.char_indices().nth(max_length) {
        Some((byte_index, _)) => &message[..byte_index],
        None => message,
    }
}

fn log_file_path(config: &LoggingConfig) -> PathBuf {
    config.file_path.as_ref().map_or_else(
        || PathBuf::from(format!("bge_{}.log", system_time_string(true))),
        PathBuf::from,
    )
}

/// Writes every record to both standard error and the log file
struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
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
