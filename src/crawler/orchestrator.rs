//! Crawl orchestrator: the Start/Stop/List control plane
//!
//! The orchestrator owns the registry and the shared HTTP client. It never
//! waits on a worker: `start` returns once the worker is spawned and `stop`
//! returns once cancellation is signaled.

use crate::config::{Config, ReportConfig};
use crate::crawler::fetcher::build_http_client;
use crate::crawler::registry::{Insertion, Registry};
use crate::crawler::task::{CrawlTask, TaskSnapshot};
use crate::crawler::worker;
use crate::state::CrawlState;
use crate::Result;
use chrono::SecondsFormat;
use futures::stream::{self, Stream, StreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::Instrument;

pub const STARTED: &str = "Started!";
pub const ALREADY_CRAWLING: &str = "Already Crawling!";
pub const CRAWL_DONE: &str = "Crawl Done!";

/// Informational reply returned by every control operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlReply {
    pub message: String,
}

impl CrawlReply {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Control plane over a crawl registry
///
/// Instances are independent; nothing is shared between two orchestrators.
/// `start` spawns onto the current Tokio runtime and must be called from
/// within one.
pub struct Orchestrator {
    registry: Registry,
    client: Client,
    report: ReportConfig,
}

impl Orchestrator {
    /// Creates an orchestrator with an HTTP client built from `config`
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_http_client(&config.user_agent, &config.fetch)?;
        Ok(Self::with_client(client, config.report.clone()))
    }

    /// Creates an orchestrator around an existing HTTP client
    pub fn with_client(client: Client, report: ReportConfig) -> Self {
        Self {
            registry: Registry::new(),
            client,
            report,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Starts crawling `root` unless it is already known
    ///
    /// | Existing task | Reply |
    /// |---------------|-------|
    /// | none | `Started!` (worker spawned) |
    /// | `Done` | `Crawl Done!` (not restarted) |
    /// | any other state | `Already Crawling!` |
    pub fn start(&self, root: &str) -> CrawlReply {
        tracing::info!("Received root: {}", root);

        match self.registry.insert_if_absent(CrawlTask::new(root)) {
            Insertion::Existing(task) => {
                let state = task.state();
                tracing::debug!("{} already known in state {}", root, state);
                if state == CrawlState::Done {
                    CrawlReply::new(CRAWL_DONE)
                } else {
                    CrawlReply::new(ALREADY_CRAWLING)
                }
            }
            Insertion::Inserted(task) => {
                self.spawn_worker(task);
                CrawlReply::new(STARTED)
            }
        }
    }

    /// Signals the worker for `root` to stop
    ///
    /// Returns immediately; the worker acknowledges by moving the task to
    /// `Done`. Repeated calls reply the same way without side effects.
    pub fn stop(&self, root: &str) -> CrawlReply {
        match self.registry.lookup(root) {
            Some(task) => {
                if task.request_stop() {
                    tracing::info!("Stopping {}", root);
                } else {
                    tracing::debug!("{} is {}, nothing to stop", root, task.state());
                }
                CrawlReply::new(format!("Stopping {}", root))
            }
            None => CrawlReply::new(format!("Not Running: {}", root)),
        }
    }

    /// Streams one report line per known task
    ///
    /// The filter is accepted for interface compatibility and ignored: every
    /// root is listed. The set of tasks is fixed when `list` is called; each
    /// line reflects the task's state at the moment it is produced.
    pub fn list(&self, root_filter: &str) -> impl Stream<Item = CrawlReply> + Send + 'static {
        tracing::debug!("Listing all roots (filter '{}' ignored)", root_filter);
        let include_links = self.report.include_links;
        stream::iter(self.registry.snapshot())
            .map(move |task| CrawlReply::new(render_report(&task.snapshot(), include_links)))
    }

    fn spawn_worker(&self, task: Arc<CrawlTask>) {
        let span = tracing::info_span!("crawl", root = %task.root());
        tokio::spawn(worker::run(task, self.client.clone()).instrument(span));
    }
}

/// Renders one human-readable report line for a task
///
/// Format: `<root>: <state>, <n> links, started <rfc3339>` optionally followed
/// by ` [link, link, ...]`.
pub fn render_report(task: &TaskSnapshot, include_links: bool) -> String {
    let count = task.links.len();
    let mut line = format!(
        "{}: {}, {} {}, started {}",
        task.root,
        task.state,
        count,
        if count == 1 { "link" } else { "links" },
        task.started_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    );

    if include_links {
        line.push_str(&format!(" [{}]", task.links.join(", ")));
    }

    line
}
