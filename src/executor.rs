use crate::consts::WORKER_NAME;
use crate::error::LogError;
use crate::runtime::{chan, spawn, Sender, WaitGroup};
use crate::worker::LogTask;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// runs LogTasks one at a time, in submit order
pub trait Executor: Send + Sync {
    fn submit(&self, task: LogTask);

    /// block until every task submitted before this call is done
    fn wait(&self) {}
}

/// one background thread draining an unbounded channel
pub struct ThreadExecutor {
    sender: Sender<LogTask>,
}

impl ThreadExecutor {
    pub fn new(name: &str) -> Result<Self, LogError> {
        let (sender, receiver) = chan::<LogTask>(None);
        spawn(name, move || {
            // ends when every sender is dropped
            for task in receiver.iter() {
                task.run();
            }
        })?;
        Ok(Self { sender })
    }
}

impl Executor for ThreadExecutor {
    fn submit(&self, task: LogTask) {
        if self.sender.send(task).is_err() {
            log::error!("log worker is gone, task dropped");
        }
    }

    fn wait(&self) {
        let wg = WaitGroup::new();
        self.submit(LogTask::Wait(wg.clone()));
        wg.wait();
    }
}

/// runs each task on the calling thread
#[derive(Default)]
pub struct InlineExecutor {}

impl Executor for InlineExecutor {
    fn submit(&self, task: LogTask) {
        task.run();
    }
}

static DEFAULT_EXECUTOR: Lazy<Option<Arc<ThreadExecutor>>> =
    Lazy::new(|| match ThreadExecutor::new(WORKER_NAME) {
        Ok(v) => Some(Arc::new(v)),
        Err(e) => {
            log::error!("start {} fail: {}", WORKER_NAME, e);
            None
        }
    });

/// the process wide worker, started on first use.
/// None if its thread could not be spawned
pub fn default_executor() -> Option<Arc<dyn Executor>> {
    DEFAULT_EXECUTOR
        .as_ref()
        .map(|v| v.clone() as Arc<dyn Executor>)
}
