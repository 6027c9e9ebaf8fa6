//! Frontier queue shared by all workers
//!
//! A FIFO of discovered-but-unvisited URLs with three extra duties:
//! - `dequeue` parks the caller until work arrives or the queue closes
//! - `close` wakes every parked worker so they can stop
//! - in-flight tracking: when the queue is empty and nothing handed out is
//!   still being processed, no more work can ever appear, so the queue
//!   closes itself and records exhaustion

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct FrontierInner {
    queue: VecDeque<String>,
    /// Items handed out by `dequeue` and not yet acknowledged
    in_flight: usize,
    closed: bool,
    exhausted: bool,
}

/// Concurrency-safe, closeable FIFO of URLs
#[derive(Debug, Default)]
pub struct Frontier {
    inner: Mutex<FrontierInner>,
    notify: Notify,
}

impl Frontier {
    /// Creates an empty, open frontier
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FrontierInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a URL to the back of the queue
    ///
    /// Returns false (and drops the URL) if the frontier is already closed.
    pub fn enqueue(&self, url: String) -> bool {
        {
            let mut inner = self.lock();
            if inner.closed {
                return false;
            }
            inner.queue.push_back(url);
        }
        self.notify.notify_one();
        true
    }

    /// Takes the next URL, waiting until one is available
    ///
    /// Returns `None` once the frontier is closed, either explicitly or
    /// because it ran dry with no item in flight. Every `Some` must be
    /// acknowledged with [`Frontier::task_done`].
    pub async fn dequeue(&self) -> Option<String> {
        loop {
            // Register interest before looking so a close/enqueue between
            // the check and the await still wakes us.
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let mut inner = self.lock();
                if inner.closed {
                    return None;
                }
                if let Some(url) = inner.queue.pop_front() {
                    inner.in_flight += 1;
                    return Some(url);
                }
                if inner.in_flight == 0 {
                    inner.closed = true;
                    inner.exhausted = true;
                    drop(inner);
                    tracing::debug!("Frontier exhausted");
                    self.notify.notify_waiters();
                    return None;
                }
            }

            notified.await;
        }
    }

    /// Acknowledges that a dequeued URL has been fully processed
    pub fn task_done(&self) {
        let exhausted = {
            let mut inner = self.lock();
            inner.in_flight = inner.in_flight.saturating_sub(1);
            if inner.in_flight == 0 && inner.queue.is_empty() && !inner.closed {
                inner.closed = true;
                inner.exhausted = true;
                true
            } else {
                false
            }
        };

        if exhausted {
            tracing::debug!("Frontier exhausted");
            self.notify.notify_waiters();
        }
    }

    /// Closes the frontier and wakes every waiting worker
    ///
    /// Queued URLs are discarded by subsequent `dequeue` calls.
    pub fn close(&self) {
        self.lock().closed = true;
        self.notify.notify_waiters();
    }

    /// Returns true once the frontier no longer hands out work
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Returns true if the frontier closed because it ran out of work
    pub fn is_exhausted(&self) -> bool {
        self.lock().exhausted
    }

    /// Number of URLs dequeued but not yet acknowledged
    pub fn in_flight(&self) -> usize {
        self.lock().in_flight
    }
}
