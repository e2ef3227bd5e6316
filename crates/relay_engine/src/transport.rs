use reqwest::header::CONTENT_TYPE;

use crate::{ScrapeError, ScrapeRecord};

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, record: &ScrapeRecord) -> Result<(), ScrapeError>;
}

/// Single-shot JSON POST to the collection endpoint. One request per call:
/// no retry, no batching, no queueing, and no client-side timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| ScrapeError::Network(err.to_string()))?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn post(&self, record: &ScrapeRecord) -> Result<(), ScrapeError> {
        let body = serde_json::to_string(record)
            .map_err(|err| ScrapeError::Encode(err.to_string()))?;

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| ScrapeError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus(status.as_u16()));
        }
        Ok(())
    }
}
