use crate::sites::SiteList;
use crate::view_model::{SiteRowView, StatusView};

/// Dispatcher phase. A single in-flight scrape at most; terminal outcomes
/// relax straight back to `Idle`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DispatchState {
    #[default]
    Idle,
    Scraping {
        url: String,
    },
}

/// Outcome of the most recent scrape attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeResult {
    Sent { url: String },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    sites: SiteList,
    auto_scrape: bool,
    dispatch: DispatchState,
    last_result: Option<ScrapeResult>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sites(&self) -> &SiteList {
        &self.sites
    }

    pub fn auto_scrape(&self) -> bool {
        self.auto_scrape
    }

    pub fn is_scraping(&self) -> bool {
        matches!(self.dispatch, DispatchState::Scraping { .. })
    }

    pub fn last_result(&self) -> Option<&ScrapeResult> {
        self.last_result.as_ref()
    }

    pub fn view(&self) -> StatusView {
        StatusView {
            is_auto_scraping: self.auto_scrape,
            scraping: self.is_scraping(),
            sites: self
                .sites
                .entries()
                .iter()
                .map(|entry| SiteRowView {
                    pattern: entry.pattern.clone(),
                    enabled: entry.enabled,
                })
                .collect(),
            last_result: self.last_result.clone(),
        }
    }

    pub(crate) fn restore(&mut self, sites: SiteList, auto_scrape: bool) {
        self.sites = sites;
        self.auto_scrape = auto_scrape;
    }

    pub(crate) fn sites_mut(&mut self) -> &mut SiteList {
        &mut self.sites
    }

    pub(crate) fn set_auto_scrape(&mut self, enabled: bool) {
        self.auto_scrape = enabled;
    }

    pub(crate) fn start_scrape(&mut self, url: String) {
        self.dispatch = DispatchState::Scraping { url };
    }

    /// Record a terminal outcome and re-arm the dispatcher.
    pub(crate) fn finish_scrape(&mut self, result: ScrapeResult) {
        self.dispatch = DispatchState::Idle;
        self.last_result = Some(result);
    }
}
