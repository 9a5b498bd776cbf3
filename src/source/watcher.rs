//! Periodic source folder polling
//!
//! Runs the resolver on a background thread at a fixed interval and sends a
//! `SourceUpdate` whenever the result changes. The task stops when `stop` is
//! called or the watcher is dropped, so no poll outlives its owner.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crate::models::SourceState;

use super::resolver::SourceResolver;

/// Change notification from the watcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceUpdate {
    /// The folder's state changed
    State(SourceState),
    /// The folder could not be read; carries the error message
    Error(String),
}

/// Repeating source folder poll with cancellation
pub struct SourceWatcher {
    /// Dropping the sender wakes the poll thread and ends it
    stop: Option<mpsc::Sender<()>>,
    /// Updates from the poll thread
    receiver: mpsc::Receiver<SourceUpdate>,
    /// Poll thread handle
    handle: Option<thread::JoinHandle<()>>,
}

impl SourceWatcher {
    /// Start polling `resolver` every `interval`; the first poll runs immediately
    pub fn spawn(resolver: SourceResolver, interval: Duration) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let (sender, receiver) = mpsc::channel();

        let handle = thread::spawn(move || {
            let mut last: Option<SourceUpdate> = None;
            loop {
                let update = match resolver.resolve() {
                    Ok(state) => SourceUpdate::State(state),
                    Err(e) => SourceUpdate::Error(e.to_string()),
                };

                if last.as_ref() != Some(&update) {
                    if sender.send(update.clone()).is_err() {
                        return;
                    }
                    last = Some(update);
                }

                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
                }
            }
        });

        Self {
            stop: Some(stop_tx),
            receiver,
            handle: Some(handle),
        }
    }

    /// Wait up to `timeout` for the next change
    pub fn next_timeout(&self, timeout: Duration) -> Option<SourceUpdate> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Take a pending change without blocking
    pub fn try_next(&self) -> Option<SourceUpdate> {
        self.receiver.try_recv().ok()
    }

    /// Cancel the poll task and wait for it to finish
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for SourceWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_reports_initial_state_and_changes() {
        let temp = TempDir::new().unwrap();
        let mut watcher = SourceWatcher::spawn(
            SourceResolver::new(temp.path()),
            Duration::from_millis(20),
        );

        match watcher.next_timeout(WAIT) {
            Some(SourceUpdate::State(SourceState::Waiting { .. })) => {}
            other => panic!("unexpected first update: {:?}", other),
        }

        fs::write(temp.path().join("custom.ttf"), b"custom").unwrap();
        match watcher.next_timeout(WAIT) {
            Some(SourceUpdate::State(state)) => assert!(state.is_ready()),
            other => panic!("unexpected update: {:?}", other),
        }

        watcher.stop();
        assert!(!watcher.is_running());
    }

    #[test]
    fn test_unchanged_state_is_not_repeated() {
        let temp = TempDir::new().unwrap();
        let watcher = SourceWatcher::spawn(
            SourceResolver::new(temp.path()),
            Duration::from_millis(10),
        );

        assert!(watcher.next_timeout(WAIT).is_some());
        assert!(watcher.next_timeout(Duration::from_millis(100)).is_none());
    }

    #[test]
    fn test_stop_returns_promptly_with_long_interval() {
        let temp = TempDir::new().unwrap();
        let mut watcher = SourceWatcher::spawn(
            SourceResolver::new(temp.path()),
            Duration::from_secs(3600),
        );
        assert!(watcher.next_timeout(WAIT).is_some());

        let started = std::time::Instant::now();
        watcher.stop();
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
