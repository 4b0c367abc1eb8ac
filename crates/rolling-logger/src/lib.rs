//! Rolling Logger
//!
//! Process-wide logging for the Tauri backend:
//! - `tracing` events and `log` records go to a daily-rotated file in the app
//!   log directory (written off-thread) and to stderr
//! - the newest lines stay in memory so the UI can show them
//!
//! On Android, `log` records go to logcat instead of the file.

mod buffer;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use thiserror::Error;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

pub use buffer::LogBuffer;

/// Current file plus archives kept in the log directory
pub const DEFAULT_MAX_FILES: usize = 5;
/// Lines kept for `recent_lines`
pub const DEFAULT_BUFFER_LINES: usize = 500;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("log file error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to open log file: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
}

#[derive(Debug, Clone)]
pub struct LoggerOptions {
    pub log_dir: PathBuf,
    pub app_name: String,
    pub rotation: Rotation,
    pub max_files: usize,
    pub buffer_lines: usize,
}

impl LoggerOptions {
    pub fn new(log_dir: impl Into<PathBuf>, app_name: &str) -> Self {
        Self {
            log_dir: log_dir.into(),
            app_name: app_name.to_string(),
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            buffer_lines: DEFAULT_BUFFER_LINES,
        }
    }

    /// File name prefix, e.g. `wayfarer` for "Wayfarer"
    fn file_prefix(&self) -> String {
        self.app_name.to_lowercase().replace(' ', "_")
    }
}

/// `MakeWriter` over the shared in-memory line buffer
#[derive(Clone)]
pub struct RecentLines {
    buffer: Arc<Mutex<LogBuffer>>,
}

impl RecentLines {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(LogBuffer::new(capacity))),
        }
    }

    pub fn recent(&self, limit: usize) -> Vec<String> {
        match self.buffer.lock() {
            Ok(buffer) => buffer.recent(limit),
            Err(poisoned) => poisoned.into_inner().recent(limit),
        }
    }
}

pub struct RecentLinesWriter {
    buffer: Arc<Mutex<LogBuffer>>,
}

impl io::Write for RecentLinesWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push_chunk(&String::from_utf8_lossy(buf));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for RecentLines {
    type Writer = RecentLinesWriter;

    fn make_writer(&'a self) -> Self::Writer {
        RecentLinesWriter {
            buffer: self.buffer.clone(),
        }
    }
}

struct Logger {
    recent: RecentLines,
    log_dir: PathBuf,
    // Flushes the file worker when dropped
    _guard: WorkerGuard,
}

/// Rotating appender for `options`, moved onto a background writer thread
pub fn file_writer(options: &LoggerOptions) -> Result<(NonBlocking, WorkerGuard), LoggerError> {
    std::fs::create_dir_all(&options.log_dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(options.rotation.clone())
        .filename_prefix(options.file_prefix())
        .filename_suffix("log")
        .max_log_files(options.max_files.max(1))
        .build(&options.log_dir)?;
    Ok(tracing_appender::non_blocking(appender))
}

fn default_filter() -> EnvFilter {
    let directives = if cfg!(debug_assertions) {
        "debug,hyper=info,hyper_util=info,reqwest=info,tao=warn,wry=off"
    } else {
        "info,tao=warn,wry=off"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

/// Initialize with default rotation settings
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), LoggerError> {
    init_with(LoggerOptions::new(log_dir.as_ref(), app_name))
}

pub fn init_with(options: LoggerOptions) -> Result<(), LoggerError> {
    if LOGGER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let (file, guard) = file_writer(&options)?;
    let recent = RecentLines::new(options.buffer_lines);

    let file_layer = fmt::layer()
        .with_timer(fmt::time::ChronoLocal::new(TIME_FORMAT.to_string()))
        .with_target(true)
        .with_ansi(false)
        .with_writer(file);
    let recent_layer = fmt::layer()
        .with_timer(fmt::time::ChronoLocal::new(TIME_FORMAT.to_string()))
        .with_target(true)
        .with_ansi(false)
        .with_writer(recent.clone());
    let stderr_layer = fmt::layer()
        .with_timer(fmt::time::ChronoLocal::new(TIME_FORMAT.to_string()))
        .with_target(true)
        .with_writer(io::stderr);

    let subscriber = registry()
        .with(default_filter())
        .with(file_layer)
        .with(recent_layer)
        .with(stderr_layer);

    #[cfg(target_os = "android")]
    {
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log::LevelFilter::Info)
                .with_tag(options.app_name.as_str()),
        );
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| LoggerError::Subscriber(e.to_string()))?;
    }
    #[cfg(not(target_os = "android"))]
    subscriber
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))?;

    LOGGER
        .set(Logger {
            recent,
            log_dir: options.log_dir.clone(),
            _guard: guard,
        })
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    tracing::info!(
        "{} logging to {} (started {})",
        options.app_name,
        options.log_dir.display(),
        chrono::Local::now().format(TIME_FORMAT)
    );
    Ok(())
}

fn logger() -> Result<&'static Logger, LoggerError> {
    LOGGER.get().ok_or(LoggerError::NotInitialized)
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    logger()?;
    tracing::info!("{}", message);
    Ok(())
}

pub fn warn(message: &str) -> Result<(), LoggerError> {
    logger()?;
    tracing::warn!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    logger()?;
    tracing::error!("{}", message);
    Ok(())
}

/// Newest `limit` lines written since startup, oldest first
pub fn recent_lines(limit: usize) -> Vec<String> {
    LOGGER.get().map(|logger| logger.recent.recent(limit)).unwrap_or_default()
}

/// Directory holding the current log file and its archives
pub fn log_dir() -> Option<PathBuf> {
    LOGGER.get().map(|logger| logger.log_dir.clone())
}
