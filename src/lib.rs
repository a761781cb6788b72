//! Ripple-Crawler: a controllable web crawling service
//!
//! This crate implements a long-running crawl service that starts, stops and
//! lists crawls of root URLs. Each root is crawled by its own background
//! worker; the orchestrator tracks every worker through a shared registry.

pub mod config;
pub mod control;
pub mod crawler;
pub mod state;

use thiserror::Error;

/// Main error type for Ripple-Crawler operations
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Failed to bind control server on {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("Control server returned HTTP {status}: {body}")]
    ControlResponse { status: u16, body: String },

    #[error("Malformed reply from control server: {0}")]
    MalformedReply(#[from] serde_json::Error),

    #[error("HTML parsing error: {0}")]
    Html(#[from] lol_html::errors::RewritingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Ripple-Crawler operations
pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlReply, CrawlTask, Orchestrator, Registry};
pub use state::CrawlState;
