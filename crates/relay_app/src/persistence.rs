use std::fs;
use std::io::{self, Write};
use std::path::Path;

use relay_core::SiteEntry;
use relay_logging::{relay_error, relay_info, relay_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

const SETTINGS_FILENAME: &str = ".pagerelay_settings.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSite {
    pattern: String,
    enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedSettings {
    sites: Vec<PersistedSite>,
    auto_scrape: bool,
}

/// Read the allow-list and auto-scrape flag. A missing file is the normal
/// first-run case and yields the defaults (empty list, false); a corrupt
/// file is logged and also yields the defaults.
pub(crate) fn load_settings(state_dir: &Path) -> (Vec<SiteEntry>, bool) {
    let path = state_dir.join(SETTINGS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return (Vec::new(), false);
        }
        Err(err) => {
            relay_warn!("Failed to read settings from {:?}: {}", path, err);
            return (Vec::new(), false);
        }
    };

    let settings: PersistedSettings = match ron::from_str(&content) {
        Ok(settings) => settings,
        Err(err) => {
            relay_warn!("Failed to parse settings from {:?}: {}", path, err);
            return (Vec::new(), false);
        }
    };

    let sites = settings
        .sites
        .into_iter()
        .map(|site| SiteEntry {
            pattern: site.pattern,
            enabled: site.enabled,
        })
        .collect();

    relay_info!("Loaded settings from {:?}", path);
    (sites, settings.auto_scrape)
}

pub(crate) fn save_settings(state_dir: &Path, sites: &[SiteEntry], auto_scrape: bool) {
    let settings = PersistedSettings {
        sites: sites
            .iter()
            .map(|site| PersistedSite {
                pattern: site.pattern.clone(),
                enabled: site.enabled,
            })
            .collect(),
        auto_scrape,
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&settings, pretty) {
        Ok(text) => text,
        Err(err) => {
            relay_error!("Failed to serialize settings: {}", err);
            return;
        }
    };

    if let Err(err) = write_settings_file(state_dir, &content) {
        relay_error!("Failed to write settings to {:?}: {}", state_dir, err);
    }
}

/// One settings file, written atomically: the RON text goes to a temp file
/// in the same directory, which then replaces the target by rename. A crash
/// mid-write leaves the previous settings intact.
fn write_settings_file(state_dir: &Path, content: &str) -> io::Result<()> {
    let mut tmp = NamedTempFile::new_in(state_dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file_mut().sync_all()?;

    let target = state_dir.join(SETTINGS_FILENAME);
    tmp.persist(&target).map_err(|err| err.error)?;
    Ok(())
}
