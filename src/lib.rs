#![forbid(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod consts;
pub mod error;
pub mod executor;
pub mod plugin;
pub mod runtime;
pub mod worker;
pub mod writer;

pub use config::Config;
pub use executor::{default_executor, Executor, InlineExecutor, ThreadExecutor};
pub use writer::LogFileWriter;
