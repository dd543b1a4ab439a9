use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

struct LogTarget {
    path: PathBuf,
    file: File,
}

lazy_static::lazy_static! {
    static ref LOGGER: Mutex<Option<LogTarget>> = Mutex::new(None);
}

/// Opens the debug log in append mode. Calling it again is a no-op.
pub fn init(path: &Path) {
    let Ok(mut logger) = LOGGER.lock() else {
        return;
    };
    if logger.is_none()
        && let Ok(file) = OpenOptions::new().create(true).append(true).open(path)
    {
        *logger = Some(LogTarget {
            path: path.to_path_buf(),
            file,
        });
    }
}

/// File the log is being written to, once initialized.
pub fn log_path() -> Option<PathBuf> {
    let logger = LOGGER.lock().ok()?;
    logger.as_ref().map(|target| target.path.clone())
}

pub fn log(message: &str) {
    let Ok(mut logger) = LOGGER.lock() else {
        return;
    };
    if let Some(target) = logger.as_mut() {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let _ = writeln!(target.file, "[{}] {}", timestamp, message);
    }
}
