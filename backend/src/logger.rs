use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use chrono::{DateTime, Local};

use crate::get_create_facilitydb_dir;

const LOG_FILE_NAME: &str = "facilitydb.log";
const KEEP_ROTATED_LOGS: usize = 5;

/// Log levels representing increasing verbosity.
///
/// Setting a level enables that level and every less verbose one:
///
/// - **Silent (0)**: No logging output
/// - **Error (1)**: Only error messages, e.g. skipped records
/// - **Warn (2)**: Warning and error messages
/// - **Info (3)**: Import summaries, warnings and errors (default)
/// - **Debug (4)**: Everything, including per-record progress and buffer sizes
///
/// Read from the `LOG_LEVEL` environment variable, or changed at runtime with
/// `set_log_level()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Silent = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
}

impl Level {
    /// Case insensitive. Returns None for unknown names.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "silent" => Some(Level::Silent),
            "error" => Some(Level::Error),
            "warn" => Some(Level::Warn),
            "info" => Some(Level::Info),
            "debug" => Some(Level::Debug),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Silent => "Silent",
            Level::Error => "Error",
            Level::Warn => "Warn",
            Level::Info => "Info",
            Level::Debug => "Debug",
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false)
}

/// Renames the current log file with its modification time and drops all but
/// the newest rotated files.
fn rotate_log_files(log_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match log_file.try_exists() {
        Ok(true) => {}
        Ok(false) | Err(_) => return Ok(()),
    }

    let modified = std::fs::metadata(log_file)?.modified()?;
    let datetime: DateTime<Local> = modified.into();
    let timestamp = datetime.format("%Y-%m-%dT%H-%M-%S");

    let parent = log_file.parent().ok_or("No parent directory")?;
    let new_path = parent.join(format!("facilitydb.{}.log", timestamp));
    std::fs::rename(log_file, &new_path)?;

    let mut rotated: Vec<PathBuf> = std::fs::read_dir(parent)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with("facilitydb.") && n.ends_with(".log") && n != LOG_FILE_NAME)
                .unwrap_or(false)
        })
        .collect();

    // Timestamped names sort chronologically.
    rotated.sort();

    if rotated.len() > KEEP_ROTATED_LOGS {
        for file in &rotated[0..rotated.len() - KEEP_ROTATED_LOGS] {
            if let Err(e) = std::fs::remove_file(file) {
                eprintln!("Failed to remove old log file {:?}: {}", file, e);
            }
        }
    }

    Ok(())
}

pub struct Logger {
    log_file: PathBuf,
    disable_log: bool,
    enable_print_log: bool,
    level: Arc<Mutex<Level>>,
}

impl Logger {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let data_dir = get_create_facilitydb_dir()
            .map_err(|e| format!("Failed to get facilitydb dir: {}", e))?;

        let log_file = data_dir.join(LOG_FILE_NAME);

        if let Err(e) = rotate_log_files(&log_file) {
            eprintln!("Failed to rotate log files: {}", e);
        }

        let level = std::env::var("LOG_LEVEL")
            .ok()
            .and_then(|v| Level::from_str(&v))
            .unwrap_or(Level::Info);

        Ok(Logger {
            log_file,
            disable_log: env_flag("DISABLE_LOG"),
            enable_print_log: env_flag("ENABLE_PRINT_LOG"),
            level: Arc::new(Mutex::new(level)),
        })
    }

    fn disabled() -> Self {
        Logger {
            log_file: PathBuf::new(),
            disable_log: true,
            enable_print_log: false,
            level: Arc::new(Mutex::new(Level::Info)),
        }
    }

    pub fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_writer(std::io::stdout)
            .finish();

        tracing::subscriber::set_global_default(subscriber)?;

        Ok(())
    }

    fn enabled(&self, required: Level) -> bool {
        match self.level.lock() {
            Ok(level) => *level >= required,
            Err(_) => true,
        }
    }

    fn write_to_file(&self, message: &str) -> Result<(), Box<dyn std::error::Error>> {
        if self.disable_log {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3fZ");
        file.write_all(format!("[{}] {}\n", timestamp, message).as_bytes())?;

        Ok(())
    }

    fn write(&self, level: Level, msg: &str) {
        if !self.enabled(level) {
            return;
        }

        if self.enable_print_log {
            match level {
                Level::Error => tracing::error!("{}", msg),
                Level::Warn => tracing::warn!("{}", msg),
                Level::Info => tracing::info!("{}", msg),
                Level::Debug => tracing::debug!("{}", msg),
                Level::Silent => {}
            }
        }

        let formatted_msg = format!("{}: {}", level.as_str().to_uppercase(), msg);
        if let Err(e) = self.write_to_file(&formatted_msg) {
            eprintln!("Failed to write to log file: {}", e);
        }
    }

    pub fn debug(&self, msg: &str) {
        self.write(Level::Debug, msg);
    }

    pub fn info(&self, msg: &str) {
        self.write(Level::Info, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.write(Level::Warn, msg);
    }

    pub fn error(&self, msg: &str) {
        self.write(Level::Error, msg);
    }

    /// Falls back to Level::Info if the lock is poisoned.
    pub fn get_level(&self) -> Level {
        self.level.lock().map(|l| *l).unwrap_or(Level::Info)
    }

    pub fn set_level(&self, new_level: Level) {
        if let Ok(mut level) = self.level.lock() {
            *level = new_level;
        }
    }
}

pub static LOGGER: OnceLock<Logger> = OnceLock::new();
static TRACING_INITIALIZED: OnceLock<()> = OnceLock::new();

fn with_logger<F, R>(f: F) -> R
where
    F: FnOnce(&Logger) -> R,
{
    TRACING_INITIALIZED.get_or_init(|| {
        // Another subscriber may already be installed by the host binary.
        let _ = Logger::init_tracing();
    });

    let logger = LOGGER.get_or_init(|| {
        match Logger::new() {
            Ok(logger) => logger,
            Err(e) => {
                eprintln!("Failed to create logger: {}", e);
                Logger::disabled()
            }
        }
    });

    f(logger)
}

pub fn info(msg: &str) {
    with_logger(|logger| logger.info(msg));
}

pub fn warn(msg: &str) {
    with_logger(|logger| logger.warn(msg));
}

pub fn error(msg: &str) {
    with_logger(|logger| logger.error(msg));
}

pub fn debug(msg: &str) {
    with_logger(|logger| logger.debug(msg));
}

pub fn get_log_level() -> Level {
    with_logger(|logger| logger.get_level())
}

pub fn set_log_level(level: Level) {
    with_logger(|logger| logger.set_level(level));
}

/// Returns false if the string is not a valid level name.
pub fn set_log_level_str(level_str: &str) -> bool {
    match Level::from_str(level_str) {
        Some(level) => {
            set_log_level(level);
            true
        }
        None => false,
    }
}

/// Formats as HH:MM:SS.
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str() {
        assert_eq!(Level::from_str("DEBUG"), Some(Level::Debug));
        assert_eq!(Level::from_str(" warn "), Some(Level::Warn));
        assert_eq!(Level::from_str("verbose"), None);
    }

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug > Level::Info);
        assert!(Level::Error > Level::Silent);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(3725)), "01:02:05");
    }

    #[test]
    fn test_disabled_logger_respects_level() {
        let logger = Logger::disabled();
        logger.set_level(Level::Error);
        assert!(logger.enabled(Level::Error));
        assert!(!logger.enabled(Level::Info));
    }
}
