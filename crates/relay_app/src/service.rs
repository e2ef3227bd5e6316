use std::io::BufRead;
use std::path::PathBuf;

use relay_core::{
    handle_request, update, AppState, Msg, Reply, Request, Response, ScrapeResult, StatusView,
};
use relay_engine::ScrapeError;
use relay_logging::{relay_info, relay_warn};

use crate::effects::EffectRunner;
use crate::persistence;

const DEFAULT_ENDPOINT: &str = "https://api.example.com/collect";

/// The background service: owns the dispatcher state, executes its effects,
/// and resolves UI requests to their responses.
pub(crate) struct RelayService {
    state: AppState,
    runner: EffectRunner,
}

impl RelayService {
    pub(crate) fn new(state_dir: PathBuf) -> Result<Self, ScrapeError> {
        let endpoint =
            std::env::var("RELAY_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let runner = EffectRunner::new(endpoint, state_dir.clone())?;

        let (sites, auto_scrape) = persistence::load_settings(&state_dir);
        let (state, _) = update(
            AppState::new(),
            Msg::SettingsRestored { sites, auto_scrape },
        );

        Ok(Self { state, runner })
    }

    pub(crate) fn status(&self) -> StatusView {
        self.state.view()
    }

    /// Apply one message and execute its effects. When a scrape starts,
    /// block until the engine reports completion and feed the outcome back
    /// through the dispatcher. Returns true when a scrape actually ran.
    pub(crate) fn apply(&mut self, msg: Msg) -> bool {
        let (state, effects) = update(std::mem::take(&mut self.state), msg);
        self.state = state;
        if !self.runner.run(effects) {
            return false;
        }
        let result = self.runner.wait_for_completion();
        let (state, effects) = update(
            std::mem::take(&mut self.state),
            Msg::ScrapeFinished { result },
        );
        self.state = state;
        self.runner.run(effects);
        true
    }

    /// Resolve a UI request to its response. Scrapes that actually start
    /// answer once the engine completes; everything else answers now.
    pub(crate) fn handle(&mut self, request: Request) -> Response {
        let (state, effects, reply) = handle_request(std::mem::take(&mut self.state), request);
        self.state = state;
        let scrape_in_flight = self.runner.run(effects);

        match reply {
            Reply::Now(response) => response,
            Reply::AfterScrape => {
                debug_assert!(scrape_in_flight);
                let result = self.runner.wait_for_completion();
                let response = match &result {
                    ScrapeResult::Sent { url } => {
                        relay_info!("Scrape completed for {}", url);
                        Response::Scrape {
                            success: true,
                            error: None,
                        }
                    }
                    ScrapeResult::Failed { reason } => {
                        relay_warn!("Scrape failed: {}", reason);
                        Response::Scrape {
                            success: false,
                            error: Some(reason.clone()),
                        }
                    }
                };
                self.apply(Msg::ScrapeFinished { result });
                response
            }
        }
    }

    /// Treat each input line as a navigation-complete event for the active
    /// tab; allow-listed pages are scraped as they arrive.
    pub(crate) fn watch(&mut self, input: impl BufRead) {
        relay_info!("Watching for navigation events on stdin");
        for line in input.lines() {
            let url = match line {
                Ok(line) => line.trim().to_string(),
                Err(err) => {
                    relay_warn!("Failed to read navigation event: {}", err);
                    break;
                }
            };
            if url.is_empty() {
                continue;
            }
            let scraped = self.apply(Msg::NavigationCompleted { url, active: true });
            if scraped {
                match self.state.last_result() {
                    Some(ScrapeResult::Sent { url }) => println!("sent {url}"),
                    Some(ScrapeResult::Failed { reason }) => println!("failed: {reason}"),
                    None => {}
                }
            }
        }
    }
}
