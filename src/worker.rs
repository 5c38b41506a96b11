use crate::config::Config;
use crate::error::LogError;
use crate::plugin::dir::ensure_dir;
use crate::plugin::file_name::{create_log_file, next_log_path, open_log_file};
use crate::plugin::keep::{Keep, QuotaKeep};
use crate::runtime::WaitGroup;
use parking_lot::Mutex;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// the file currently written by one writer. only touched by worker tasks
#[derive(Default)]
struct FileSlot {
    path: Option<PathBuf>,
    file: Option<File>,
    bytes_written: usize,
}

/// how `FileSlot::rotate` treats an existing file of the next name
#[derive(Clone, Copy, PartialEq, Eq)]
enum OpenMode {
    Append,
    /// size rotation: keeps every file within `file_len`
    Truncate,
}

impl FileSlot {
    /// close any open file and open the next rotated one.
    /// the directory is recreated if it was removed
    fn rotate(&mut self, config: &Config, mode: OpenMode) -> Result<(), LogError> {
        self.file = None;
        self.bytes_written = 0;
        ensure_dir(&config.dir)?;
        let path = next_log_path(&config.dir, &config.prefix);
        let file = match mode {
            OpenMode::Append => open_log_file(&path)?,
            OpenMode::Truncate => create_log_file(&path)?,
        };
        self.path = Some(path);
        self.file = Some(file);
        Ok(())
    }

    /// the open file was removed from disk behind our back
    fn is_stale(&self) -> bool {
        match &self.path {
            Some(path) => !path.exists(),
            None => true,
        }
    }
}

/// state shared by a writer handle and the worker
pub struct WriterState {
    pub config: Config,
    enabled: AtomicBool,
    slot: Mutex<FileSlot>,
}

impl WriterState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            enabled: AtomicBool::new(false),
            slot: Mutex::new(FileSlot::default()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn current_path(&self) -> Option<PathBuf> {
        self.slot.lock().path.clone()
    }

    pub fn bytes_written(&self) -> usize {
        self.slot.lock().bytes_written
    }

    /// has an open file
    pub fn is_open(&self) -> bool {
        self.slot.lock().file.is_some()
    }

    fn init(&self) -> Result<(), LogError> {
        self.slot.lock().rotate(&self.config, OpenMode::Append)?;
        self.enabled.store(true, Ordering::Release);
        Ok(())
    }

    fn save(&self, data: &[u8]) -> Result<(), LogError> {
        let mut slot = self.slot.lock();
        if slot.file.is_none() {
            slot.rotate(&self.config, OpenMode::Append)?;
        } else if slot.is_stale() {
            log::warn!(
                "log file {:?} is gone, open a new one",
                slot.path.as_ref().map(|v| v.display().to_string())
            );
            slot.rotate(&self.config, OpenMode::Append)?;
        }
        if let Some(file) = slot.file.as_mut() {
            file.write_all(data)?;
            file.flush()?;
        }
        slot.bytes_written += data.len();
        if slot.bytes_written > self.config.file_len {
            slot.file = None;
            QuotaKeep(self.config.quota).do_keep(&self.config.dir, &self.config.prefix);
            slot.rotate(&self.config, OpenMode::Truncate)?;
        }
        Ok(())
    }

    fn close(&self) -> Result<(), LogError> {
        let mut slot = self.slot.lock();
        slot.bytes_written = 0;
        if let Some(mut file) = slot.file.take() {
            file.flush()?;
        }
        Ok(())
    }
}

/// one unit of work for the worker, consumed exactly once
pub enum LogTask {
    /// ensure the directory and open the first file
    Init(Arc<WriterState>),
    /// write a buffer snapshot
    Save(Arc<WriterState>, Vec<u8>),
    /// close the current file
    Close(Arc<WriterState>),
    /// dropped when all earlier tasks are done
    Wait(WaitGroup),
}

impl LogTask {
    /// errors are logged, never returned
    pub fn run(self) {
        match self {
            LogTask::Init(state) => {
                if let Err(e) = state.init() {
                    log::error!(
                        "init log writer {}/{} fail, writer disabled: {}",
                        state.config.dir.display(),
                        state.config.prefix,
                        e
                    );
                }
            }
            LogTask::Save(state, data) => {
                if let Err(e) = state.save(&data) {
                    log::error!("save {} bytes of {} fail: {}", data.len(), state.config.prefix, e);
                }
            }
            LogTask::Close(state) => {
                if let Err(e) = state.close() {
                    log::error!("close log file of {} fail: {}", state.config.prefix, e);
                }
            }
            LogTask::Wait(wg) => {
                drop(wg);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::config::Config;
    use crate::consts::LogSize;
    use crate::worker::{LogTask, WriterState};
    use std::fs::remove_dir_all;
    use std::path::Path;
    use std::sync::Arc;

    fn state(dir: &str, file_len: usize) -> Arc<WriterState> {
        let _ = remove_dir_all(dir);
        Arc::new(WriterState::new(
            Config::new(dir, "app", 1024 * 1024).file_len(LogSize::B(file_len)),
        ))
    }

    #[test]
    fn test_init() {
        let s = state("target/test/worker_init", 1024);
        assert!(!s.is_enabled());
        LogTask::Init(s.clone()).run();
        assert!(s.is_enabled());
        assert!(s.current_path().unwrap().exists());
        let _ = remove_dir_all("target/test/worker_init");
    }

    #[test]
    fn test_init_fail_stays_disabled() {
        let root = Path::new("target/test/worker_init_fail");
        let _ = remove_dir_all(root);
        std::fs::create_dir_all(root).unwrap();
        std::fs::write(root.join("file"), b"x").unwrap();
        // parent is a regular file, so the directory can not be created
        let s = Arc::new(WriterState::new(Config::new(root.join("file/logs"), "app", 1024)));
        LogTask::Init(s.clone()).run();
        assert!(!s.is_enabled());
        assert!(s.current_path().is_none());
        let _ = remove_dir_all(root);
    }

    #[test]
    fn test_save_rotate() {
        let s = state("target/test/worker_rotate", 10);
        LogTask::Init(s.clone()).run();
        let first = s.current_path().unwrap();
        // next rotation lands in another second
        std::thread::sleep(std::time::Duration::from_millis(1100));
        LogTask::Save(s.clone(), b"12345".to_vec()).run();
        assert_eq!(s.bytes_written(), 5);
        LogTask::Save(s.clone(), b"678901".to_vec()).run();
        assert_eq!(s.bytes_written(), 0);
        assert!(s.is_open());
        let second = s.current_path().unwrap();
        assert_ne!(first, second);
        assert_eq!(std::fs::read(&first).unwrap(), b"12345678901");
        assert_eq!(std::fs::metadata(&second).unwrap().len(), 0);
        let _ = remove_dir_all("target/test/worker_rotate");
    }

    #[test]
    fn test_close_then_save_reopens() {
        let s = state("target/test/worker_close", 1024);
        LogTask::Init(s.clone()).run();
        LogTask::Save(s.clone(), b"abc".to_vec()).run();
        LogTask::Close(s.clone()).run();
        assert!(!s.is_open());
        assert_eq!(s.bytes_written(), 0);
        LogTask::Save(s.clone(), b"def".to_vec()).run();
        assert!(s.is_open());
        assert_eq!(s.bytes_written(), 3);
        let _ = remove_dir_all("target/test/worker_close");
    }

    #[test]
    fn test_save_after_remove() {
        let s = state("target/test/worker_removed", 1024);
        LogTask::Init(s.clone()).run();
        LogTask::Save(s.clone(), b"abc".to_vec()).run();
        std::fs::remove_file(s.current_path().unwrap()).unwrap();
        LogTask::Save(s.clone(), b"def".to_vec()).run();
        let path = s.current_path().unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"def");
        assert_eq!(s.bytes_written(), 3);
        let _ = remove_dir_all("target/test/worker_removed");
    }

    #[test]
    fn test_same_second_rotate_truncates() {
        let s = state("target/test/worker_same_second", 10);
        LogTask::Init(s.clone()).run();
        for _ in 0..20 {
            LogTask::Save(s.clone(), b"12345678901".to_vec()).run();
            assert_eq!(s.bytes_written(), 0);
        }
        for e in std::fs::read_dir("target/test/worker_same_second").unwrap().flatten() {
            assert!(e.metadata().unwrap().len() <= 11, "{:?}", e.path());
        }
        let _ = remove_dir_all("target/test/worker_same_second");
    }

    #[test]
    fn test_init_open_fail_stays_disabled() {
        let dir = "target/test/worker_open_fail";
        let _ = remove_dir_all(dir);
        // the directory is created, the file's parent `missing/` is not
        let s = Arc::new(WriterState::new(Config::new(dir, "missing/app", 1024)));
        LogTask::Init(s.clone()).run();
        assert!(Path::new(dir).is_dir());
        assert!(!s.is_enabled());
        assert!(!s.is_open());
        let _ = remove_dir_all(dir);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_write_fail_keeps_enabled() {
        let s = state("target/test/worker_write_fail", 1024);
        LogTask::Init(s.clone()).run();
        // every write to /dev/full fails with ENOSPC
        let full = std::fs::OpenOptions::new().write(true).open("/dev/full").unwrap();
        s.slot.lock().file = Some(full);
        LogTask::Save(s.clone(), b"lost".to_vec()).run();
        assert!(s.is_enabled());
        assert_eq!(s.bytes_written(), 0);
        LogTask::Close(s.clone()).run();
        LogTask::Save(s.clone(), b"kept".to_vec()).run();
        assert!(s.is_enabled());
        assert_eq!(s.bytes_written(), 4);
        let all: Vec<u8> = std::fs::read_dir("target/test/worker_write_fail")
            .unwrap()
            .flatten()
            .flat_map(|e| std::fs::read(e.path()).unwrap())
            .collect();
        assert_eq!(all, b"kept");
        let _ = remove_dir_all("target/test/worker_write_fail");
    }

    #[test]
    fn test_dir_removed_recreated() {
        let dir = "target/test/worker_dir_removed";
        let s = state(dir, 1024);
        LogTask::Init(s.clone()).run();
        LogTask::Save(s.clone(), b"a".to_vec()).run();
        remove_dir_all(dir).unwrap();
        LogTask::Save(s.clone(), b"b".to_vec()).run();
        assert!(Path::new(dir).is_dir());
        assert_eq!(std::fs::read(s.current_path().unwrap()).unwrap(), b"b");
        let _ = remove_dir_all(dir);
    }
}
