use chrono::Local;
use log::warn;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_FILE: &str = "game_log.txt";

/// Receiver of round lifecycle messages. Must never fail the caller.
pub trait LogSink {
    fn log(&mut self, message: &str);
}

impl<L: LogSink + ?Sized> LogSink for &mut L {
    fn log(&mut self, message: &str) {
        (**self).log(message);
    }
}

/// In-memory capture, handy for tests and the plain frontend.
impl LogSink for Vec<String> {
    fn log(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// Default location: `<local data dir>/hangman/game_log.txt`, or the
/// working directory when the platform has no data dir.
#[must_use]
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("hangman").join(DEFAULT_LOG_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
}

#[must_use]
pub fn format_entry(message: &str) -> String {
    format!("[{}] {message}\n", Local::now().format("%Y-%m-%d %H:%M:%S"))
}

/// Append-only game log file, opened once per process.
///
/// If the file cannot be opened the log degrades to a no-op; the file is
/// flushed and closed when the value is dropped.
pub struct EventLog {
    writer: Option<BufWriter<File>>,
}

impl EventLog {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!("Cannot create log directory {}: {e}", parent.display());
        }
        let writer = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(BufWriter::new(file)),
            Err(e) => {
                warn!("Cannot open game log {}: {e}", path.display());
                None
            }
        };
        Self { writer }
    }

    /// A log that drops every message.
    #[must_use]
    pub fn disabled() -> Self {
        Self { writer: None }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }
}

impl LogSink for EventLog {
    fn log(&mut self, message: &str) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };
        let entry = format_entry(message);
        if let Err(e) = writer
            .write_all(entry.as_bytes())
            .and_then(|()| writer.flush())
        {
            warn!("Game log write failed: {e}");
        }
    }
}

impl Drop for EventLog {
    fn drop(&mut self) {
        if let Some(writer) = self.writer.as_mut() {
            let _ = writer.flush();
        }
    }
}
