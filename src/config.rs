use crate::consts::{LogSize, MAX_BUF_LEN, MAX_SIZE_PER_FILE};
use std::fmt::{Debug, Formatter};
use std::path::PathBuf;

/// the LogFileWriter Config
/// for example:
// LogFileWriter::new(
//         Config::new("target/logs", "app", 100 * 1024).file_len(LogSize::KB(64))
// )
#[derive(Clone)]
pub struct Config {
    /// directory holding the rotated files
    pub dir: PathBuf,
    /// file name prefix, files are named `<prefix>-<date>.txt`
    pub prefix: String,
    /// max total bytes kept across all files of this prefix
    pub quota: u64,
    /// buffered bytes before the buffer is handed to the worker
    pub buffer_len: usize,
    /// bytes per file before rotation
    pub file_len: usize,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("dir", &self.dir)
            .field("prefix", &self.prefix)
            .field("quota", &self.quota)
            .field("buffer_len", &self.buffer_len)
            .field("file_len", &self.file_len)
            .finish()
    }
}

impl Config {
    pub fn new<P: Into<PathBuf>>(dir: P, prefix: &str, quota: u64) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.to_string(),
            quota,
            buffer_len: MAX_BUF_LEN,
            file_len: MAX_SIZE_PER_FILE,
        }
    }

    /// set buffer capacity
    pub fn buffer_len(mut self, len: LogSize) -> Self {
        self.buffer_len = len.get_len();
        self
    }

    /// set rotate size
    pub fn file_len(mut self, len: LogSize) -> Self {
        self.file_len = len.get_len();
        self
    }
}
