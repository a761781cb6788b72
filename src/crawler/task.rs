//! Per-root crawl task state
//!
//! A `CrawlTask` is shared between the registry and the worker that crawls its
//! root through an `Arc`, so both always observe the same `state` and `links`.
//! Both fields sit behind one lock, which keeps a snapshot's state and link
//! list consistent with each other.

use crate::state::CrawlState;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

/// One crawl of one root URL
#[derive(Debug)]
pub struct CrawlTask {
    root: String,
    started_at: DateTime<Utc>,
    cancel: CancellationToken,
    progress: Mutex<Progress>,
}

#[derive(Debug)]
struct Progress {
    state: CrawlState,
    links: Vec<String>,
}

/// Point-in-time copy of a task, used for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSnapshot {
    pub root: String,
    pub state: CrawlState,
    pub links: Vec<String>,
    pub started_at: DateTime<Utc>,
}

impl CrawlTask {
    /// Creates a new `Running` task with no links
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            started_at: Utc::now(),
            cancel: CancellationToken::new(),
            progress: Mutex::new(Progress {
                state: CrawlState::Running,
                links: Vec::new(),
            }),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn state(&self) -> CrawlState {
        self.progress.lock().state
    }

    pub fn link_count(&self) -> usize {
        self.progress.lock().links.len()
    }

    pub fn links(&self) -> Vec<String> {
        self.progress.lock().links.clone()
    }

    pub fn snapshot(&self) -> TaskSnapshot {
        let progress = self.progress.lock();
        TaskSnapshot {
            root: self.root.clone(),
            state: progress.state,
            links: progress.links.clone(),
            started_at: self.started_at,
        }
    }

    /// True once a stop has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Token observed by the worker bound to this task
    pub(crate) fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Moves a `Running` task to `Stopping` and fires its cancellation signal
    ///
    /// Returns `false` without side effects if the task is not `Running`, so the
    /// signal fires at most once.
    pub(crate) fn request_stop(&self) -> bool {
        let mut progress = self.progress.lock();
        if progress.state != CrawlState::Running {
            return false;
        }
        progress.state = CrawlState::Stopping;
        self.cancel.cancel();
        true
    }

    /// Appends a discovered link; refused once the task has left `Running`
    pub(crate) fn push_link(&self, link: String) -> bool {
        let mut progress = self.progress.lock();
        if progress.state != CrawlState::Running {
            return false;
        }
        progress.links.push(link);
        true
    }

    /// Records the worker's outcome and returns the resulting state
    ///
    /// Terminal states are never overwritten.
    pub(crate) fn finish(&self, outcome: CrawlState) -> CrawlState {
        let mut progress = self.progress.lock();
        if progress.state.can_transition_to(outcome) {
            progress.state = outcome;
        }
        progress.state
    }
}
