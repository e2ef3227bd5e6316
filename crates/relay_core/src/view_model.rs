use crate::ScrapeResult;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusView {
    pub is_auto_scraping: bool,
    pub scraping: bool,
    pub sites: Vec<SiteRowView>,
    pub last_result: Option<ScrapeResult>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRowView {
    pub pattern: String,
    pub enabled: bool,
}
