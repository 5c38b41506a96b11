use crate::consts::LOG_EXT;
use crate::error::LogError;
use fastdate::DateTime;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// fixed width, so sorting names by string equals sorting by time
pub const DATE_FORMAT: &str = "YYYY-MM-DD_hh-mm-ss";

/// `<prefix>-<date>.txt`
pub fn log_file_name(prefix: &str, date: &DateTime) -> String {
    format!("{}-{}{}", prefix, date.format(DATE_FORMAT), LOG_EXT)
}

/// path of the next log file, stamped with the local wall clock.
/// two rotations within the same second produce the same path
pub fn next_log_path(dir: &Path, prefix: &str) -> PathBuf {
    dir.join(log_file_name(prefix, &DateTime::now()))
}

/// open for append, an existing file of the same name is never truncated
pub fn open_log_file(path: &Path) -> Result<File, LogError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LogError::from(format!("open({}) fail: {}", path.display(), e)))
}

/// open empty. a file of the same name, rotated earlier within the same
/// second, is replaced
pub fn create_log_file(path: &Path) -> Result<File, LogError> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| LogError::from(format!("create({}) fail: {}", path.display(), e)))
}
