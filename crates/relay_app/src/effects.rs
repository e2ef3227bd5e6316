use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use relay_core::{Effect, ScrapeResult};
use relay_engine::{EngineConfig, EngineEvent, EngineHandle, RequestId, ScrapeError};
use relay_logging::relay_info;

use crate::persistence;

/// Executes core effects: settings writes go straight to the store, scrape
/// effects go to the engine. Runs on the service thread only, so settings
/// writes are naturally single-writer.
pub(crate) struct EffectRunner {
    engine: EngineHandle,
    state_dir: PathBuf,
    next_request_id: RequestId,
}

impl EffectRunner {
    pub(crate) fn new(endpoint: String, state_dir: PathBuf) -> Result<Self, ScrapeError> {
        let mut config = EngineConfig::default_with_endpoint(endpoint);
        config.now_utc = Arc::new(|| Utc::now().to_rfc3339());
        if let Ok(user_agent) = std::env::var("RELAY_USER_AGENT") {
            config.fetch.user_agent = user_agent;
        }

        let engine = EngineHandle::new(config)?;
        Ok(Self {
            engine,
            state_dir,
            next_request_id: 0,
        })
    }

    /// Returns true when a scrape was dispatched and a completion event is
    /// pending.
    pub(crate) fn run(&mut self, effects: Vec<Effect>) -> bool {
        let mut scrape_in_flight = false;
        for effect in effects {
            match effect {
                Effect::PersistSettings { sites, auto_scrape } => {
                    persistence::save_settings(&self.state_dir, &sites, auto_scrape);
                }
                Effect::Scrape { url } => {
                    self.next_request_id += 1;
                    relay_info!("Scrape request {} for {}", self.next_request_id, url);
                    self.engine.scrape(self.next_request_id, url);
                    scrape_in_flight = true;
                }
            }
        }
        scrape_in_flight
    }

    /// Block until the in-flight scrape finishes and map its outcome into
    /// the dispatcher's result type.
    pub(crate) fn wait_for_completion(&self) -> ScrapeResult {
        loop {
            match self.engine.recv() {
                Some(EngineEvent::Started { url, .. }) => {
                    relay_info!("Scraping {}", url);
                }
                Some(EngineEvent::Completed { result, .. }) => {
                    return map_outcome(result);
                }
                None => {
                    return ScrapeResult::Failed {
                        reason: "Scrape engine stopped unexpectedly".to_string(),
                    };
                }
            }
        }
    }
}

fn map_outcome(result: Result<relay_engine::SendOutcome, ScrapeError>) -> ScrapeResult {
    match result {
        Ok(outcome) => ScrapeResult::Sent { url: outcome.url },
        Err(err) => ScrapeResult::Failed {
            reason: err.to_string(),
        },
    }
}
