//! File logger for bar processes, whose stdout belongs to the bar.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{LevelFilter, Metadata, Record, SetLoggerError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogInitError {
    #[error("cannot open log file {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    AlreadySet(#[from] SetLoggerError),
}

struct FileLogger {
    file: Mutex<File>,
    level: LevelFilter,
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Install a logger appending to `path` at `level` and above.
pub fn init_logger(path: impl AsRef<Path>, level: LevelFilter) -> Result<(), LogInitError> {
    let path = path.as_ref();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LogInitError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    log::set_boxed_logger(Box::new(FileLogger {
        file: Mutex::new(file),
        level,
    }))?;
    log::set_max_level(level);
    Ok(())
}
