//! Rolling Logger
//!
//! Installs a `tracing-subscriber` registry that writes every event to stderr
//! and to `<log_dir>/<app_name>.log`. The file is rolled by size and the most
//! recent lines are kept in a circular buffer so a shell can show them without
//! reading the file back.
//!
//! `log` records are bridged into tracing, so libraries can keep using the
//! `log` macros.

use std::collections::VecDeque;
use std::fmt as std_fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Size after which the active log file is rolled
pub const DEFAULT_MAX_FILE_BYTES: u64 = 1024 * 1024;
/// Number of files kept, the active one included
pub const DEFAULT_MAX_FILES: usize = 3;
/// Lines kept in the in-memory buffer
pub const DEFAULT_BUFFER_LINES: usize = 200;

static LOGGER: OnceLock<RollingWriter> = OnceLock::new();

/// Logger errors
#[derive(Debug)]
pub enum LoggerError {
    Io(io::Error),
    AlreadyInitialized,
    NotInitialized,
}

impl std_fmt::Display for LoggerError {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        match self {
            LoggerError::Io(e) => write!(f, "Log file error: {}", e),
            LoggerError::AlreadyInitialized => write!(f, "Logger already initialized"),
            LoggerError::NotInitialized => write!(f, "Logger not initialized"),
        }
    }
}

impl std::error::Error for LoggerError {}

impl From<io::Error> for LoggerError {
    fn from(e: io::Error) -> Self {
        LoggerError::Io(e)
    }
}

/// Rolling behaviour of a [`RollingWriter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingOptions {
    pub max_file_bytes: u64,
    pub max_files: usize,
    pub buffer_lines: usize,
}

impl Default for RollingOptions {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            max_files: DEFAULT_MAX_FILES,
            buffer_lines: DEFAULT_BUFFER_LINES,
        }
    }
}

struct RollingState {
    path: PathBuf,
    file: File,
    written: u64,
    options: RollingOptions,
    recent: VecDeque<String>,
    partial: String,
}

impl RollingState {
    fn open(dir: &Path, app_name: &str, options: RollingOptions) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.log", app_name));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            path,
            file,
            written,
            options,
            recent: VecDeque::with_capacity(options.buffer_lines),
            partial: String::new(),
        })
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let incoming = buf.len() as u64;
        if self.written > 0 && self.written + incoming > self.options.max_file_bytes {
            self.roll()?;
        }

        self.file.write_all(buf)?;
        self.written += incoming;
        self.remember(buf);
        Ok(buf.len())
    }

    /// Split written bytes into lines for the circular buffer.
    /// A line may arrive across several writes.
    fn remember(&mut self, buf: &[u8]) {
        if self.options.buffer_lines == 0 {
            return;
        }

        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=pos).collect();
            let line = line.trim_end_matches(['\r', '\n']).to_string();

            if self.recent.len() == self.options.buffer_lines {
                self.recent.pop_front();
            }
            self.recent.push_back(line);
        }
    }

    /// `<name>.log.(n-1)` is dropped, every other file shifts up by one
    /// and a fresh `<name>.log` is opened.
    fn roll(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.options.max_files > 1 {
            for index in (1..self.options.max_files - 1).rev() {
                let from = self.rolled_path(index);
                if from.exists() {
                    let to = self.rolled_path(index + 1);
                    if to.exists() {
                        fs::remove_file(&to)?;
                    }
                    fs::rename(&from, &to)?;
                }
            }

            let first = self.rolled_path(1);
            if first.exists() {
                fs::remove_file(&first)?;
            }
            fs::rename(&self.path, &first)?;
        }

        self.file = File::create(&self.path)?;
        self.written = 0;
        Ok(())
    }

    fn rolled_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{}", index));
        PathBuf::from(name)
    }
}

/// Size-rolled file writer usable as a `tracing-subscriber` writer
#[derive(Clone)]
pub struct RollingWriter {
    state: Arc<Mutex<RollingState>>,
}

impl RollingWriter {
    pub fn new(
        log_dir: impl AsRef<Path>,
        app_name: &str,
        options: RollingOptions,
    ) -> Result<Self, LoggerError> {
        let state = RollingState::open(log_dir.as_ref(), app_name, options)?;
        Ok(Self {
            state: Arc::new(Mutex::new(state)),
        })
    }

    /// Most recent complete lines, oldest first
    pub fn recent_lines(&self) -> Vec<String> {
        self.lock().recent.iter().cloned().collect()
    }

    /// Path of the active log file
    pub fn path(&self) -> PathBuf {
        self.lock().path.clone()
    }

    fn lock(&self) -> MutexGuard<'_, RollingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Writer handed out per event; holds the file lock until dropped
pub struct RollingGuard<'a>(MutexGuard<'a, RollingState>);

impl Write for RollingGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        RollingGuard(self.lock())
    }
}

/// Local wall-clock timestamps
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std_fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Initialize the global logger with default rolling options
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), LoggerError> {
    init_logger_with(log_dir, app_name, RollingOptions::default())
}

/// Initialize the global logger
///
/// Fails with [`LoggerError::AlreadyInitialized`] if any global subscriber
/// or `log` logger is already installed.
pub fn init_logger_with(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    options: RollingOptions,
) -> Result<(), LoggerError> {
    if LOGGER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let writer = RollingWriter::new(log_dir, app_name, options)?;
    let level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    tracing_subscriber::registry()
        .with(level)
        .with(fmt::layer().with_timer(LocalTime).with_writer(io::stderr))
        .with(
            fmt::layer()
                .with_timer(LocalTime)
                .with_ansi(false)
                .with_writer(writer.clone()),
        )
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    LOGGER
        .set(writer)
        .map_err(|_| LoggerError::AlreadyInitialized)
}

/// Recent log lines, empty before [`init_logger`]
pub fn recent_lines() -> Vec<String> {
    LOGGER
        .get()
        .map(RollingWriter::recent_lines)
        .unwrap_or_default()
}

/// Path of the active log file
pub fn log_path() -> Option<PathBuf> {
    LOGGER.get().map(RollingWriter::path)
}

pub fn info(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::info!(target: "rolling_logger", "{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::error!(target: "rolling_logger", "{}", msg);
    Ok(())
}

fn ensure_initialized() -> Result<(), LoggerError> {
    LOGGER
        .get()
        .map(|_| ())
        .ok_or(LoggerError::NotInitialized)
}
