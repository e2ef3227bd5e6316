use crate::{ScrapeResult, SiteEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Settings loaded from persisted storage at startup.
    SettingsRestored {
        sites: Vec<SiteEntry>,
        auto_scrape: bool,
    },
    /// User added a site to the allow-list.
    SiteAdded(String),
    /// User removed a site from the allow-list.
    SiteRemoved(String),
    /// User toggled a single site's enabled flag.
    SiteEnabledSet { url: String, enabled: bool },
    /// User switched the global auto-scrape flag.
    AutoScrapeSet { enabled: bool },
    /// Explicit user trigger; `None` when no active page could be resolved.
    ScrapeRequested { url: Option<String> },
    /// The active tab finished loading a page.
    NavigationCompleted { url: String, active: bool },
    /// The engine reported the end of a scrape-and-send attempt.
    ScrapeFinished { result: ScrapeResult },
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Request sent from a UI surface to the background service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ToggleAutoScrape { enabled: bool },
    GetStatus,
    ScrapeCurrentPage { url: Option<String> },
}

/// Response shape for each [`Request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Status { is_auto_scraping: bool },
    Scrape { success: bool, error: Option<String> },
}

/// How a request's response resolves. Scrapes that actually start answer
/// asynchronously, once the dispatcher sees `Msg::ScrapeFinished`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Now(Response),
    AfterScrape,
}
