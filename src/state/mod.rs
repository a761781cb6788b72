//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: lifecycle of one root's crawl task (running, stopping, done, failed)

mod crawl_state;

pub use crawl_state::CrawlState;
