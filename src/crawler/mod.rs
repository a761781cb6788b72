//! Crawler module: the crawl orchestrator and everything it drives
//!
//! This module contains the core crawling logic, including:
//! - The registry of per-root crawl tasks
//! - The Start/Stop/List control plane
//! - The background worker that fetches a root page
//! - Streaming link extraction

mod extractor;
mod fetcher;
mod orchestrator;
mod registry;
mod task;
mod worker;

pub use extractor::{anchor_link, extract_links, LinkExtractor};
pub use fetcher::{build_http_client, user_agent};
pub use orchestrator::{
    render_report, CrawlReply, Orchestrator, ALREADY_CRAWLING, CRAWL_DONE, STARTED,
};
pub use registry::{Insertion, Registry};
pub use task::{CrawlTask, TaskSnapshot};
