//! HTTP client construction for crawl workers
//!
//! Every worker shares one `reqwest::Client`, so connection pools are reused
//! across roots on the same host.

use crate::config::{FetchConfig, UserAgentConfig};
use reqwest::Client;
use std::time::Duration;

/// Formats the crawler's user agent string
///
/// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
pub fn user_agent(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Builds the HTTP client used to fetch root pages
///
/// # Arguments
///
/// * `agent` - The user agent configuration
/// * `fetch` - Request and connect timeouts
///
/// # Example
///
/// ```no_run
/// use ripple_crawler::config::{FetchConfig, UserAgentConfig};
/// use ripple_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    agent: &UserAgentConfig,
    fetch: &FetchConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent(agent))
        .timeout(Duration::from_secs(fetch.request_timeout_secs))
        .connect_timeout(Duration::from_secs(fetch.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}
