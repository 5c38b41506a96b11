use crate::error::LogError;
use std::path::Path;

/// make sure `dir` is a directory.
/// a file occupying the path is removed first
pub fn ensure_dir(dir: &Path) -> Result<(), LogError> {
    if dir.is_dir() {
        return Ok(());
    }
    if dir.exists() {
        std::fs::remove_file(dir).map_err(|e| {
            LogError::from(format!("remove_file({}) fail: {}", dir.display(), e))
        })?;
    }
    std::fs::create_dir_all(dir)
        .map_err(|e| LogError::from(format!("create_dir_all({}) fail: {}", dir.display(), e)))?;
    Ok(())
}
