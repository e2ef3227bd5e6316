use serde::Serialize;
use thiserror::Error;

pub type RequestId = u64;

/// Cap on extracted page text, in characters.
pub const CONTENT_CHAR_LIMIT: usize = 10_000;

/// The flat record posted to the collection endpoint. Built fresh per
/// extraction, consumed exactly once by the transport, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeRecord {
    pub url: String,
    pub title: String,
    pub content: String,
    /// ISO-8601, supplied by the clock injected through [`crate::EngineConfig`].
    pub timestamp: String,
    #[serde(rename = "userAgent")]
    pub user_agent: String,
}

impl ScrapeRecord {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        timestamp: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            content: content.into(),
            timestamp: timestamp.into(),
            user_agent: user_agent.into(),
        }
    }
}

/// Terminal failure of one scrape-and-send attempt. Never retried; rendered
/// to a short human-readable string for the UI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScrapeError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("No content was scraped from the page")]
    EmptyContent,
    #[error("failed to encode scrape record: {0}")]
    Encode(String),
}

/// What the engine reports back for a sent record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOutcome {
    pub url: String,
    pub content_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Started {
        request_id: RequestId,
        url: String,
    },
    Completed {
        request_id: RequestId,
        result: Result<SendOutcome, ScrapeError>,
    },
}
