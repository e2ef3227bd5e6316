use crate::SiteEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write the allow-list and auto-scrape flag to persisted storage.
    PersistSettings {
        sites: Vec<SiteEntry>,
        auto_scrape: bool,
    },
    /// Run one scrape-and-send for `url` after the engine's settle delay.
    Scrape { url: String },
}
