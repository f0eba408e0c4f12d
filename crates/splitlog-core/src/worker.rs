//! Single-consumer task queue drained by one background thread
//!
//! Producers `post` tasks and return immediately. The thread runs the handler
//! for each task in enqueue order, one at a time. `stop` closes the queue,
//! waits for everything already queued to be handled, and joins the thread.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Sender};
use parking_lot::{Mutex, RwLock};

use crate::error::{LogError, LogResult};

/// A background thread consuming tasks of type `T` in FIFO order
pub struct Worker<T: Send + 'static> {
    name: String,
    sender: RwLock<Option<Sender<T>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Worker<T> {
    /// Start a named thread that runs `handler` for every posted task
    ///
    /// Whatever the handler owns is dropped on the worker thread after the
    /// last task has run.
    pub fn spawn<F>(name: impl Into<String>, mut handler: F) -> LogResult<Self>
    where
        F: FnMut(T) + Send + 'static,
    {
        let name = name.into();
        let (sender, receiver) = unbounded::<T>();

        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                // Ends once every sender is gone and the queue is empty.
                for task in receiver.iter() {
                    handler(task);
                }
            })
            .map_err(LogError::Spawn)?;

        Ok(Self {
            name,
            sender: RwLock::new(Some(sender)),
            handle: Mutex::new(Some(handle)),
        })
    }

    /// Enqueue a task without blocking
    ///
    /// Returns `false` and drops the task if the worker has stopped.
    pub fn post(&self, task: T) -> bool {
        match self.sender.read().as_ref() {
            Some(sender) => sender.send(task).is_ok(),
            None => false,
        }
    }

    /// Number of tasks queued but not yet taken by the thread
    pub fn pending(&self) -> usize {
        self.sender.read().as_ref().map(|s| s.len()).unwrap_or(0)
    }

    /// Whether `post` currently accepts tasks
    pub fn is_running(&self) -> bool {
        self.sender.read().is_some()
    }

    /// Close the queue, drain it, and join the thread
    ///
    /// Returns `false` if the thread had panicked. Safe to call more than once.
    pub fn stop(&self) -> bool {
        drop(self.sender.write().take());

        match self.handle.lock().take() {
            Some(handle) if handle.thread().id() != thread::current().id() => handle.join().is_ok(),
            _ => true,
        }
    }
}

impl<T: Send + 'static> Drop for Worker<T> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<T: Send + 'static> std::fmt::Debug for Worker<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("name", &self.name)
            .field("running", &self.is_running())
            .field("pending", &self.pending())
            .finish()
    }
}
