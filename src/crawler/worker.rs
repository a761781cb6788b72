//! Crawl worker: fetches one root page and records its links
//!
//! The worker moves through `Fetching -> Parsing -> Done | Failed`:
//!
//! 1. If a stop was already requested, finish as `Done` without fetching.
//! 2. GET the root. A transport error finishes the task as `Failed`.
//! 3. Stream the body through the link extractor, appending each link to the
//!    task as soon as its tag is complete.
//! 4. End of body, or a body read error, finishes the task as `Done`.
//!
//! The cancellation signal is observed while the request is in flight and
//! between body chunks, so a stop takes effect after at most one network read.
//! Only the root is fetched; discovered links are never followed.

use crate::crawler::extractor::LinkExtractor;
use crate::crawler::task::CrawlTask;
use crate::state::CrawlState;
use reqwest::{Client, Response};
use std::sync::Arc;

/// Runs the crawl for `task` and records its final state
///
/// The response and its connection are dropped on every exit path.
pub async fn run(task: Arc<CrawlTask>, client: Client) {
    let outcome = crawl_root(&task, &client).await;
    // A Stop that lands after a failed GET but before this call has already
    // replied "Stopping"; the task still ends `Failed`, since `finish` accepts
    // Stopping -> Failed.
    let state = task.finish(outcome);
    tracing::info!(
        "Crawl of {} finished: {} ({} links)",
        task.root(),
        state,
        task.link_count()
    );
}

async fn crawl_root(task: &CrawlTask, client: &Client) -> CrawlState {
    let cancel = task.cancellation();
    if cancel.is_cancelled() {
        tracing::debug!("Stop requested before fetch");
        return CrawlState::Done;
    }

    tracing::debug!("Fetching {}", task.root());
    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::debug!("Stop requested during fetch");
            return CrawlState::Done;
        }
        result = client.get(task.root()).send() => result,
    };

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Failed to crawl {}: {}", task.root(), e);
            return CrawlState::Failed;
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("{} returned HTTP {}, scanning body anyway", task.root(), status);
    }

    parse_body(task, response).await
}

async fn parse_body(task: &CrawlTask, mut response: Response) -> CrawlState {
    let cancel = task.cancellation();
    let mut extractor = LinkExtractor::new();

    loop {
        let chunk = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Stop requested during parse");
                return CrawlState::Done;
            }
            chunk = response.chunk() => chunk,
        };

        match chunk {
            Ok(Some(bytes)) => match extractor.feed(&bytes) {
                Ok(links) => {
                    if !record_links(task, links.into_iter()) {
                        return CrawlState::Done;
                    }
                }
                Err(e) => {
                    tracing::debug!("Gave up parsing {}: {}", task.root(), e);
                    return CrawlState::Done;
                }
            },
            Ok(None) => {
                match extractor.finish() {
                    Ok(links) => {
                        record_links(task, links.into_iter());
                    }
                    Err(e) => tracing::debug!("Gave up parsing {}: {}", task.root(), e),
                }
                return CrawlState::Done;
            }
            Err(e) => {
                // A truncated body ends the document like a parse error would
                tracing::debug!("Body of {} ended early: {}", task.root(), e);
                return CrawlState::Done;
            }
        }
    }
}

/// Appends links to the task; returns false once the task stops accepting them
fn record_links(task: &CrawlTask, links: impl Iterator<Item = String>) -> bool {
    for link in links {
        tracing::trace!("Discovered {}", link);
        if !task.push_link(link) {
            return false;
        }
    }
    true
}
