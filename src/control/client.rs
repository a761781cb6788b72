//! HTTP client for a running crawl service

use crate::config::ClientConfig;
use crate::control::messages::CrawlRequest;
use crate::crawler::CrawlReply;
use crate::{CrawlerError, Result};
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

/// Calls Start/Stop/List on a control server
#[derive(Debug, Clone)]
pub struct ControlClient {
    base: Url,
    http: Client,
}

impl ControlClient {
    /// Creates a client for the server at `config.address`
    ///
    /// `config.request_timeout_ms` bounds each call, including the whole List
    /// stream.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base = Url::parse(&config.address)?;
        let http = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self { base, http })
    }

    pub async fn start(&self, root: &str) -> Result<CrawlReply> {
        self.post("start", root).await
    }

    pub async fn stop(&self, root: &str) -> Result<CrawlReply> {
        self.post("stop", root).await
    }

    /// Requests the list and hands each reply to `on_reply` as it arrives
    ///
    /// Returns the number of replies received.
    pub async fn list<F>(&self, root_filter: &str, mut on_reply: F) -> Result<usize>
    where
        F: FnMut(CrawlReply),
    {
        let mut url = self.base.join("list")?;
        url.query_pairs_mut().append_pair("root", root_filter);

        let mut response = check_status(self.http.get(url).send().await?).await?;
        let mut pending: Vec<u8> = Vec::new();
        let mut received = 0;

        while let Some(chunk) = response.chunk().await? {
            pending.extend_from_slice(&chunk);
            while let Some(newline) = pending.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = pending.drain(..=newline).collect();
                if let Some(reply) = parse_line(&line)? {
                    on_reply(reply);
                    received += 1;
                }
            }
        }

        if let Some(reply) = parse_line(&pending)? {
            on_reply(reply);
            received += 1;
        }

        Ok(received)
    }

    async fn post(&self, path: &str, root: &str) -> Result<CrawlReply> {
        let url = self.base.join(path)?;
        let request = CrawlRequest {
            root: root.to_string(),
        };
        let response = check_status(self.http.post(url).json(&request).send().await?).await?;
        Ok(response.json().await?)
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(CrawlerError::ControlResponse {
        status: status.as_u16(),
        body,
    })
}

/// Parses one NDJSON line; blank lines yield `None`
fn parse_line(line: &[u8]) -> Result<Option<CrawlReply>> {
    let line = line.trim_ascii();
    if line.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(line)?))
}
