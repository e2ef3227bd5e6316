/// One allow-list entry. `pattern` is always stored in normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteEntry {
    pub pattern: String,
    pub enabled: bool,
}

/// The auto-scrape allow-list: an ordered set of site patterns, unique on
/// their normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SiteList {
    entries: Vec<SiteEntry>,
}

/// Normalize a user-supplied URL or host fragment for comparison:
/// lower-cased, scheme stripped, leading `www.` stripped, trailing
/// slashes stripped.
pub fn normalize_site_pattern(url: &str) -> String {
    let mut rest = url.trim().to_ascii_lowercase();
    for scheme in ["https://", "http://"] {
        if let Some(stripped) = rest.strip_prefix(scheme) {
            rest = stripped.to_string();
            break;
        }
    }
    if let Some(stripped) = rest.strip_prefix("www.") {
        rest = stripped.to_string();
    }
    rest.trim_end_matches('/').to_string()
}

impl SiteList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the list from persisted entries. Patterns are re-normalized
    /// so hand-edited state files cannot smuggle in unnormalized forms.
    pub fn from_entries(entries: impl IntoIterator<Item = SiteEntry>) -> Self {
        let mut list = Self::new();
        for entry in entries {
            let pattern = normalize_site_pattern(&entry.pattern);
            if pattern.is_empty() || list.contains(&pattern) {
                continue;
            }
            list.entries.push(SiteEntry {
                pattern,
                enabled: entry.enabled,
            });
        }
        list
    }

    pub fn entries(&self) -> &[SiteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an enabled entry for `url`. Adding a pattern that normalizes
    /// identically to an existing one is a silent no-op; callers detect
    /// duplicates by re-querying the list.
    pub fn add(&mut self, url: &str) {
        let pattern = normalize_site_pattern(url);
        if pattern.is_empty() || self.contains(&pattern) {
            return;
        }
        self.entries.push(SiteEntry {
            pattern,
            enabled: true,
        });
    }

    /// Remove any entry matching `url` under normalization. Removing a
    /// non-existent entry is a no-op.
    pub fn remove(&mut self, url: &str) {
        let pattern = normalize_site_pattern(url);
        self.entries.retain(|entry| entry.pattern != pattern);
    }

    /// Flip the enabled flag on the entry matching `url`; no-op when no
    /// entry matches.
    pub fn set_enabled(&mut self, url: &str, enabled: bool) {
        let pattern = normalize_site_pattern(url);
        if let Some(entry) = self.entries.iter_mut().find(|e| e.pattern == pattern) {
            entry.enabled = enabled;
        }
    }

    /// Whether a navigation to `current_url` should auto-scrape.
    ///
    /// True iff some enabled entry's pattern is a prefix of the normalized
    /// current URL, or appears as a substring of the raw current URL. The
    /// dual check is intentionally permissive: "example.com/blog" matches
    /// "example.com/blog/post-1", and a bare host matches wherever it is
    /// embedded, query strings included. No wildcard or regex syntax.
    pub fn should_auto_scrape(&self, current_url: &str) -> bool {
        if current_url.is_empty() {
            return false;
        }
        let normalized = normalize_site_pattern(current_url);
        self.entries.iter().any(|entry| {
            entry.enabled
                && (normalized.starts_with(&entry.pattern)
                    || current_url.contains(&entry.pattern))
        })
    }

    fn contains(&self, normalized: &str) -> bool {
        self.entries.iter().any(|entry| entry.pattern == normalized)
    }
}
