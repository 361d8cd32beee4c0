// src/ingest/fetch.rs
//! Outbound HTTP: one GET per source, bounded by a timeout that drops the in-flight request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, redirect, Client};
use thiserror::Error;

use crate::config::DigestConfig;
use crate::registry::SourceDescriptor;

#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS, connect, TLS, or redirect-limit failures.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    Status(u16),
    #[error("timeout after {0} ms")]
    Timeout(u64),
    #[error("response too large: exceeds {0} bytes")]
    TooLarge(usize),
    #[error("reading body failed: {0}")]
    Body(String),
    /// The per-source task panicked or was aborted.
    #[error("source task failed: {0}")]
    Task(String),
}

/// Raw body retrieval for one source. Implementations must not apply parsing.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, source: &SourceDescriptor) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher. Redirects are delegated to the client with a hard cap,
/// and bodies larger than `max_body_bytes` are abandoned mid-stream.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    max_body_bytes: usize,
}

impl HttpFetcher {
    pub fn new(cfg: &DigestConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(cfg.user_agent.clone())
            .connect_timeout(cfg.fetch_timeout)
            .redirect(redirect::Policy::limited(cfg.max_redirects))
            .build()?;
        Ok(Self {
            client,
            max_body_bytes: cfg.max_body_bytes,
        })
    }
}

#[async_trait]
impl FeedFetcher for HttpFetcher {
    async fn fetch(&self, source: &SourceDescriptor) -> Result<String, FetchError> {
        let mut resp = self
            .client
            .get(&source.url)
            .header(header::ACCEPT, source.format.accept())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let cap = self.max_body_bytes;
        if resp.content_length().is_some_and(|n| n > cap as u64) {
            return Err(FetchError::TooLarge(cap));
        }

        // Content-Length may be absent or wrong; count what actually arrives.
        let mut buf: Vec<u8> = Vec::new();
        while let Some(chunk) = resp
            .chunk()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?
        {
            if buf.len() + chunk.len() > cap {
                return Err(FetchError::TooLarge(cap));
            }
            buf.extend_from_slice(&chunk);
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Run one fetch under `timeout`. Elapsing drops the request future, aborting the connection.
pub async fn fetch_with_timeout(
    fetcher: &dyn FeedFetcher,
    source: &SourceDescriptor,
    timeout: Duration,
) -> Result<String, FetchError> {
    match tokio::time::timeout(timeout, fetcher.fetch(source)).await {
        Ok(res) => res,
        Err(_) => Err(FetchError::Timeout(timeout.as_millis() as u64)),
    }
}
