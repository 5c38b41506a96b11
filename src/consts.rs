/// max bytes buffered per writer before a forced flush
pub const MAX_BUF_LEN: usize = 16 * 1024;

/// max bytes per log file before rotation
pub const MAX_SIZE_PER_FILE: usize = 200 * 1024;

/// log file extension
pub const LOG_EXT: &str = ".txt";

/// name of the background worker thread
pub const WORKER_NAME: &str = "log-handler";

pub enum LogSize {
    B(usize),
    KB(usize),
    MB(usize),
    GB(usize),
}

impl LogSize {
    pub fn get_len(&self) -> usize {
        match self {
            Self::B(b) => *b,
            Self::KB(kb) => kb * 1024,
            Self::MB(mb) => mb * 1024 * 1024,
            Self::GB(gb) => gb * 1024 * 1024 * 1024,
        }
    }
}
