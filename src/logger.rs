use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::{Mutex, OnceLock};

use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Appends timestamped lines to a file. Stdout is the game screen, so nothing
/// is ever printed there.
pub struct Logger {
    prefix: Option<String>,
    file: Mutex<File>,
}

impl Logger {
    fn new(prefix: Option<String>, file: File) -> Self {
        Self { prefix, file: Mutex::new(file) }
    }

    pub fn log(&self, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = if let Some(ref prefix) = self.prefix {
            format!("[{}][{}] {}\n", timestamp, prefix, message)
        } else {
            format!("[{}] {}\n", timestamp, message)
        };

        if let Ok(mut file) = self.file.lock() {
            let _ = file.write_all(line.as_bytes());
        }
    }
}

pub fn init_logger(prefix: Option<String>, file_path: &str) -> Result<(), String> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)
        .map_err(|e| format!("Failed to open log file {}: {}", file_path, e))?;
    LOGGER.get_or_init(|| Logger::new(prefix, file));
    Ok(())
}

/// Messages before `init_logger` (or without a log file) are dropped.
pub fn log(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(&format!($($arg)*))
    };
}
