use crate::buffer::{encode_line, LogBuffer, Push};
use crate::config::Config;
use crate::executor::{default_executor, Executor};
use crate::worker::{LogTask, WriterState};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

/// Buffered log file writer.
///
/// Lines are collected in memory and handed to a single background worker,
/// which owns all file io: opening, writing, rotating once a file grows past
/// `Config::file_len`, and deleting the oldest files of `Config::prefix`
/// so the total stays within `Config::quota`.
///
/// No method blocks on io or reports an error. Until the worker has created
/// the directory and opened the first file every call is a no-op, and if
/// that fails the writer stays disabled.
pub struct LogFileWriter {
    state: Arc<WriterState>,
    buffer: Mutex<LogBuffer>,
    executor: Option<Arc<dyn Executor>>,
}

impl LogFileWriter {
    /// use the process wide worker thread
    pub fn new(config: Config) -> Self {
        Self::build(config, default_executor())
    }

    pub fn with_executor(config: Config, executor: Arc<dyn Executor>) -> Self {
        Self::build(config, Some(executor))
    }

    fn build(config: Config, executor: Option<Arc<dyn Executor>>) -> Self {
        let buffer = Mutex::new(LogBuffer::new(config.buffer_len));
        let state = Arc::new(WriterState::new(config));
        if let Some(executor) = &executor {
            executor.submit(LogTask::Init(state.clone()));
        }
        Self {
            state,
            buffer,
            executor,
        }
    }

    fn enabled_executor(&self) -> Option<&Arc<dyn Executor>> {
        if !self.state.is_enabled() {
            return None;
        }
        self.executor.as_ref()
    }

    /// append `msg` with a millisecond timestamp.
    /// a line longer than the buffer capacity is dropped
    pub fn log(&self, msg: &str) {
        let executor = match self.enabled_executor() {
            Some(v) => v,
            None => return,
        };
        let line = encode_line(SystemTime::now(), msg);
        // submit under the lock, so snapshots reach the queue in order
        let mut buffer = self.buffer.lock();
        if let Push::Swapped(data) = buffer.push(&line) {
            executor.submit(LogTask::Save(self.state.clone(), data));
        }
    }

    /// hand the buffered lines to the worker
    pub fn flush(&self) {
        let executor = match self.enabled_executor() {
            Some(v) => v,
            None => return,
        };
        let mut buffer = self.buffer.lock();
        if buffer.is_empty() {
            return;
        }
        executor.submit(LogTask::Save(self.state.clone(), buffer.take()));
    }

    /// flush, then close the current file. the next save opens a new one
    pub fn close_current_file(&self) {
        let executor = match self.enabled_executor() {
            Some(v) => v,
            None => return,
        };
        self.flush();
        executor.submit(LogTask::Close(self.state.clone()));
    }

    /// block until the worker has processed everything submitted so far
    pub fn wait(&self) {
        if let Some(executor) = &self.executor {
            executor.wait();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }

    pub fn current_path(&self) -> Option<PathBuf> {
        self.state.current_path()
    }

    /// bytes written to the current file
    pub fn bytes_written(&self) -> usize {
        self.state.bytes_written()
    }

    /// bytes waiting in the buffer
    pub fn buffered(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn config(&self) -> &Config {
        &self.state.config
    }
}

impl Drop for LogFileWriter {
    fn drop(&mut self) {
        self.flush();
    }
}
