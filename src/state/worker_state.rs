//! Worker lifecycle states
//!
//! A worker starts `Running`, may pass through `Draining` when it notices
//! the search halted while it still holds a page, and always ends `Stopped`.

use std::fmt;

/// Represents the current state of a search worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerState {
    /// Pulling pages from the frontier and expanding them
    Running,

    /// Search halted mid-page; remaining links of the page are discarded
    Draining,

    /// Worker has left its loop
    Stopped,
}

impl WorkerState {
    /// Returns true if the worker may still pick up new pages
    pub fn accepts_work(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Checks whether a transition is part of the worker lifecycle
    ///
    /// Running -> Draining -> Stopped, with Running -> Stopped as the shortcut
    /// taken on queue closure. Stopped is final.
    pub fn can_transition_to(&self, next: WorkerState) -> bool {
        matches!(
            (self, next),
            (Self::Running, Self::Draining)
                | (Self::Running, Self::Stopped)
                | (Self::Draining, Self::Stopped)
        )
    }

    /// Short lowercase label used in log output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
