use std::time::Duration;

use crate::ScrapeError;

/// Stand-in for the page-context snapshot boundary: load the page the way
/// a browser tab already has it, here by fetching it over HTTP.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            user_agent: format!("PageRelay/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPage {
    /// URL after redirects; this is what the scrape record carries.
    pub final_url: String,
    pub html: String,
}

#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    async fn load(&self, url: &str) -> Result<LoadedPage, ScrapeError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestPageSource {
    settings: FetchSettings,
}

impl ReqwestPageSource {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, ScrapeError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .user_agent(self.settings.user_agent.clone())
            .build()
            .map_err(|err| ScrapeError::Network(err.to_string()))
    }
}

#[async_trait::async_trait]
impl PageSource for ReqwestPageSource {
    async fn load(&self, url: &str) -> Result<LoadedPage, ScrapeError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| ScrapeError::InvalidUrl(err.to_string()))?;
        let client = self.build_client()?;

        let response = client
            .get(parsed)
            .send()
            .await
            .map_err(|err| ScrapeError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus(status.as_u16()));
        }

        let final_url = response.url().to_string();
        let html = response
            .text()
            .await
            .map_err(|err| ScrapeError::Network(err.to_string()))?;

        Ok(LoadedPage { final_url, html })
    }
}
