//! Cancellable background loads.
//!
//! A [`LoadHandle`] owns a spawned task and aborts it when dropped, so a view
//! that goes away never receives a stale result. [`PanelSlot`] holds at most
//! one in-flight load and aborts the previous one when replaced.

use std::future::Future;

use thiserror::Error;
use tokio::task::JoinHandle;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    #[error("load was cancelled")]
    Cancelled,

    #[error("load task panicked")]
    Panicked,
}

#[derive(Debug)]
pub struct LoadHandle<T> {
    task: Option<JoinHandle<T>>,
}

impl<T: Send + 'static> LoadHandle<T> {
    /// Spawn `future` on the current Tokio runtime.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            task: Some(tokio::spawn(future)),
        }
    }
}

impl<T> LoadHandle<T> {
    pub fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the result.
    pub async fn join(mut self) -> Result<T, LoadError> {
        let Some(task) = self.task.as_mut() else {
            return Err(LoadError::Cancelled);
        };
        let outcome = task.await;
        self.task = None;
        outcome.map_err(|e| {
            if e.is_cancelled() {
                LoadError::Cancelled
            } else {
                LoadError::Panicked
            }
        })
    }
}

impl<T> Drop for LoadHandle<T> {
    fn drop(&mut self) {
        self.abort();
    }
}

/// One panel's current load.
#[derive(Debug)]
pub struct PanelSlot<T> {
    current: Option<LoadHandle<T>>,
}

impl<T> Default for PanelSlot<T> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<T: Send + 'static> PanelSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load, aborting whatever was running.
    pub fn replace<F>(&mut self, future: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        if self.current.is_some() {
            tracing::debug!("superseding in-flight panel load");
        }
        self.current = Some(LoadHandle::spawn(future));
    }

    /// Take the current load to await it.
    pub fn take(&mut self) -> Option<LoadHandle<T>> {
        self.current.take()
    }

    pub fn cancel(&mut self) {
        self.current = None;
    }

    pub fn is_loading(&self) -> bool {
        self.current.as_ref().is_some_and(|h| !h.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn join_returns_the_task_output() {
        let handle = LoadHandle::spawn(async { 41 + 1 });
        assert_eq!(handle.join().await, Ok(42));
    }

    #[tokio::test]
    async fn dropping_the_handle_aborts_the_task() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();
        let handle = LoadHandle::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            flag.store(true, Ordering::SeqCst);
        });

        drop(handle);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn replacing_a_slot_aborts_the_previous_load() {
        let first_done = Arc::new(AtomicBool::new(false));
        let flag = first_done.clone();

        let mut slot = PanelSlot::new();
        slot.replace(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            flag.store(true, Ordering::SeqCst);
            1
        });
        slot.replace(async { 2 });

        let latest = slot.take().unwrap().join().await;
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(latest, Ok(2));
        assert!(!first_done.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn aborted_handle_reports_cancelled() {
        let mut handle = LoadHandle::spawn(async { 1 });
        handle.abort();
        assert_eq!(handle.join().await, Err(LoadError::Cancelled));
    }
}
