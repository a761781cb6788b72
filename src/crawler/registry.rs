//! Crawl registry: the single source of truth for which roots are known
//!
//! The registry maps each root URL to its shared `CrawlTask`. Entries are
//! never removed or replaced, so a task handle obtained from the registry
//! stays valid for the life of the process.

use crate::crawler::task::CrawlTask;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// Outcome of `Registry::insert_if_absent`
#[derive(Debug, Clone)]
pub enum Insertion {
    /// The task was stored under its root
    Inserted(Arc<CrawlTask>),
    /// A task already existed for the root; the new one was discarded
    Existing(Arc<CrawlTask>),
}

/// Concurrency-safe map from root URL to crawl task
#[derive(Debug, Default)]
pub struct Registry {
    tasks: DashMap<String, Arc<CrawlTask>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the task for `root`, if one was ever started
    pub fn lookup(&self, root: &str) -> Option<Arc<CrawlTask>> {
        self.tasks.get(root).map(|entry| Arc::clone(entry.value()))
    }

    /// Atomically stores `task` unless its root is already present
    ///
    /// Two concurrent calls for the same root never both observe `Inserted`.
    pub fn insert_if_absent(&self, task: CrawlTask) -> Insertion {
        match self.tasks.entry(task.root().to_string()) {
            Entry::Occupied(entry) => Insertion::Existing(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let task = Arc::new(task);
                entry.insert(Arc::clone(&task));
                Insertion::Inserted(task)
            }
        }
    }

    /// Handles to every task present at call time, oldest first
    ///
    /// The map is not locked while callers use the handles, so a task may be
    /// observed before or after a concurrent update.
    pub fn snapshot(&self) -> Vec<Arc<CrawlTask>> {
        let mut tasks: Vec<Arc<CrawlTask>> = self
            .tasks
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        tasks.sort_by(|a, b| {
            a.started_at()
                .cmp(&b.started_at())
                .then_with(|| a.root().cmp(b.root()))
        });
        tasks
    }

    /// Visits every task present at call time
    pub fn for_each(&self, mut visitor: impl FnMut(&CrawlTask)) {
        for task in self.snapshot() {
            visitor(task.as_ref());
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
