/// Crawl state definitions for tracking a root's lifecycle
///
/// A crawl task starts `Running`, may be asked to stop (`Stopping`) and ends in
/// either `Done` or `Failed`.
use std::fmt;

/// Represents the current state of a crawl task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    // ===== Active States =====
    /// A worker is fetching or parsing the root page
    Running,

    /// Cancellation has been signaled but the worker has not acknowledged it yet
    Stopping,

    // ===== Terminal States =====
    /// The worker finished the page or acknowledged a stop request
    Done,

    /// The root page could not be fetched
    Failed,
}

impl CrawlState {
    /// Returns true if this is a terminal state (the worker has exited)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true if a transition from `self` to `next` is allowed
    ///
    /// Terminal states are sticky and `Stopping` can only be entered from `Running`.
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        match (self, next) {
            (Self::Running, Self::Stopping) => true,
            (Self::Running | Self::Stopping, Self::Done | Self::Failed) => true,
            _ => false,
        }
    }

    /// Human-readable label used in list reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Stopping => "Stopping",
            Self::Done => "Done",
            Self::Failed => "Failed",
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
