use std::fs::DirEntry;
use std::path::Path;

/// keep logs, files that do not meet the retention conditions will be deleted
pub trait Keep: Send + Sync {
    /// return removed nums
    fn do_keep(&self, dir: &Path, prefix: &str) -> i64;

    /// files of `prefix` in `dir`, sorted by name ascending (oldest first)
    fn read_paths(&self, dir: &Path, prefix: &str) -> Vec<DirEntry> {
        let paths = match std::fs::read_dir(dir) {
            Ok(v) => v,
            Err(e) => {
                log::error!("read_dir({}) fail: {}", dir.display(), e);
                return vec![];
            }
        };
        let mut paths_vec = vec![];
        for path in paths.flatten() {
            let name = path.file_name();
            let is_log = name.to_str().map(|v| v.starts_with(prefix)).unwrap_or(false);
            if !is_log {
                continue;
            }
            if let Ok(t) = path.file_type() {
                if t.is_file() {
                    paths_vec.push(path);
                }
            }
        }
        paths_vec.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        paths_vec
    }
}

/// keep the newest files whose total size fits in the quota (bytes)
pub struct QuotaKeep(pub u64);

impl Keep for QuotaKeep {
    fn do_keep(&self, dir: &Path, prefix: &str) -> i64 {
        let mut removed = 0;
        let paths_vec = self.read_paths(dir, prefix);
        let mut quota = self.0;
        let mut exhausted = false;
        for item in paths_vec.iter().rev() {
            let len = match item.metadata() {
                Ok(m) => m.len(),
                Err(e) => {
                    log::error!("metadata({}) fail: {}", item.path().display(), e);
                    continue;
                }
            };
            if !exhausted && len <= quota {
                quota -= len;
                if quota == 0 {
                    exhausted = true;
                }
                continue;
            }
            match std::fs::remove_file(item.path()) {
                Ok(_) => {
                    log::debug!("quota removed {}", item.path().display());
                    removed += 1;
                }
                Err(e) => log::error!("remove_file({}) fail: {}", item.path().display(), e),
            }
        }
        removed
    }
}
