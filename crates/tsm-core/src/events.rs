//! Progress and diagnostic notifications.
//!
//! Every long-running operation takes an `&dyn Observer`. Notifications are
//! informational only; an observer can't influence the operation.

use serde::{Deserialize, Serialize};

/// Download progress snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Bytes received so far
    pub received: u64,
    /// Bytes still expected
    pub remaining: u64,
    /// Completion in percent, 0 to 100
    pub percent: f64,
}

impl Progress {
    /// Snapshot for `received` out of `total` bytes.
    ///
    /// `remaining` and `percent` saturate so a server sending more than it
    /// announced never reports more than 100%.
    #[must_use]
    pub fn new(received: u64, total: u64) -> Self {
        let remaining = total.saturating_sub(received);
        #[allow(clippy::cast_precision_loss)]
        let percent = if total == 0 {
            100.0
        } else {
            ((received as f64 / total as f64) * 100.0).min(100.0)
        };

        Self {
            received,
            remaining,
            percent,
        }
    }

    /// Final snapshot once a download has finished
    #[must_use]
    pub const fn complete(received: u64) -> Self {
        Self {
            received,
            remaining: 0,
            percent: 100.0,
        }
    }
}

/// Notification emitted by an operation
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Diagnostic message
    Debug(String),
    /// A recoverable problem, e.g. a build that had to be skipped
    Warn(String),
    /// Download progress
    Progress(Progress),
    /// Archive finished downloading
    Downloaded,
    /// Operation finished successfully
    Done,
}

/// Receiver for [`Event`]s
pub trait Observer: Send + Sync {
    /// Handle one event
    fn notify(&self, event: &Event);
}

impl<F> Observer for F
where
    F: Fn(&Event) + Send + Sync,
{
    fn notify(&self, event: &Event) {
        self(event);
    }
}

/// Observer that drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn notify(&self, _event: &Event) {}
}

/// Observer that forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn notify(&self, event: &Event) {
        match event {
            Event::Debug(msg) => tracing::debug!("{msg}"),
            Event::Warn(msg) => tracing::warn!("{msg}"),
            Event::Progress(p) => tracing::trace!(
                received = p.received,
                remaining = p.remaining,
                percent = p.percent,
                "download progress"
            ),
            Event::Downloaded => tracing::debug!("download complete"),
            Event::Done => tracing::debug!("done"),
        }
    }
}
