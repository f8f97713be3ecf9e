// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Owned, cancellable timer tasks.
//!
//! Every timer the component starts is a spawned task paired with a child
//! [`CancellationToken`] of the component's root token. The pair lives in a
//! [`TaskGuard`]; dropping the guard cancels the token and aborts the task, so a
//! timer can never outlive the slot that owns it.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A spawned task that is cancelled when the guard is dropped.
#[derive(Debug)]
pub struct TaskGuard {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl TaskGuard {
    /// Spawn a task whose token is a child of `parent`.
    ///
    /// The future is raced against the token, so it stops at its next await
    /// point once the guard or any ancestor token is cancelled.
    pub fn spawn<F, Fut>(parent: &CancellationToken, f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = parent.child_token();
        let task = f(token.clone());
        let cancel = token.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = task => {}
            }
        });
        Self { token, handle }
    }

    /// Spawn a one-shot timer that runs `f` after `delay`.
    pub fn after<F, Fut>(parent: &CancellationToken, delay: Duration, f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::spawn(parent, move |_| async move {
            tokio::time::sleep(delay).await;
            f().await;
        })
    }

    /// Whether the task has run to completion or been aborted.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancel the task.
    pub fn cancel(&self) {
        self.token.cancel();
        self.handle.abort();
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Holder for at most one live timer.
///
/// Setting a new guard cancels the previous one.
#[derive(Debug, Default)]
pub struct TimerSlot {
    guard: Option<TaskGuard>,
}

impl TimerSlot {
    /// An empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a timer, cancelling whatever was there.
    pub fn set(&mut self, guard: TaskGuard) {
        self.guard = Some(guard);
    }

    /// Cancel and release the current timer.
    pub fn cancel(&mut self) {
        self.guard = None;
    }

    /// Whether a timer is installed and still running.
    pub fn is_active(&self) -> bool {
        self.guard
            .as_ref()
            .map(|g| !g.is_finished() && !g.is_cancelled())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_after_fires_once() {
        let root = CancellationToken::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let guard = TaskGuard::after(&root, Duration::from_secs(5), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(4900)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(guard.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_timer() {
        let root = CancellationToken::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let guard = TaskGuard::after(&root, Duration::from_secs(1), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        drop(guard);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_root_cancel_stops_children() {
        let root = CancellationToken::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let guard = TaskGuard::spawn(&root, move |_| async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            loop {
                ticker.tick().await;
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_millis(2500)).await;
        let seen = hits.load(Ordering::SeqCst);
        assert!(seen >= 2);

        root.cancel();
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(hits.load(Ordering::SeqCst), seen);
        assert!(guard.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slot_replaces_previous_timer() {
        let root = CancellationToken::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let mut slot = TimerSlot::new();

        let first = hits.clone();
        slot.set(TaskGuard::after(&root, Duration::from_secs(1), move || async move {
            first.fetch_add(1, Ordering::SeqCst);
        }));
        let second = hits.clone();
        slot.set(TaskGuard::after(&root, Duration::from_secs(1), move || async move {
            second.fetch_add(10, Ordering::SeqCst);
        }));
        assert!(slot.is_active());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 10);
        assert!(!slot.is_active());
    }

    #[tokio::test]
    async fn test_slot_cancel() {
        let root = CancellationToken::new();
        let mut slot = TimerSlot::new();
        slot.set(TaskGuard::after(&root, Duration::from_secs(60), || async {}));
        assert!(slot.is_active());
        slot.cancel();
        assert!(!slot.is_active());
    }
}
