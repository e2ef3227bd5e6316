use url::Url;

use crate::{AppState, Effect, Msg, Reply, Request, Response, ScrapeResult, SiteList};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SettingsRestored { sites, auto_scrape } => {
            state.restore(SiteList::from_entries(sites), auto_scrape);
            Vec::new()
        }
        Msg::SiteAdded(url) => {
            state.sites_mut().add(&url);
            vec![persist_effect(&state)]
        }
        Msg::SiteRemoved(url) => {
            state.sites_mut().remove(&url);
            vec![persist_effect(&state)]
        }
        Msg::SiteEnabledSet { url, enabled } => {
            state.sites_mut().set_enabled(&url, enabled);
            vec![persist_effect(&state)]
        }
        Msg::AutoScrapeSet { enabled } => {
            state.set_auto_scrape(enabled);
            vec![persist_effect(&state)]
        }
        Msg::ScrapeRequested { url } => begin_scrape(&mut state, url),
        Msg::NavigationCompleted { url, active } => {
            let qualifies =
                active && state.auto_scrape() && state.sites().should_auto_scrape(&url);
            if qualifies {
                begin_scrape(&mut state, Some(url))
            } else {
                Vec::new()
            }
        }
        Msg::ScrapeFinished { result } => {
            state.finish_scrape(result);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Applies a UI request to state. `ScrapeCurrentPage` that passes the
/// pre-flight checks answers with [`Reply::AfterScrape`]; the caller builds
/// the response from the eventual `Msg::ScrapeFinished` outcome.
pub fn handle_request(state: AppState, request: Request) -> (AppState, Vec<Effect>, Reply) {
    match request {
        Request::ToggleAutoScrape { enabled } => {
            let (state, effects) = update(state, Msg::AutoScrapeSet { enabled });
            let reply = Reply::Now(Response::Status {
                is_auto_scraping: state.auto_scrape(),
            });
            (state, effects, reply)
        }
        Request::GetStatus => {
            let reply = Reply::Now(Response::Status {
                is_auto_scraping: state.auto_scrape(),
            });
            (state, Vec::new(), reply)
        }
        Request::ScrapeCurrentPage { url } => {
            let already_scraping = state.is_scraping();
            let (state, effects) = update(state, Msg::ScrapeRequested { url });
            let reply = if already_scraping {
                // The trigger was dropped by the single-flight guard; there
                // is no completion coming for this request.
                Reply::Now(Response::Scrape {
                    success: false,
                    error: Some("A scrape is already in progress".to_string()),
                })
            } else if state.is_scraping() {
                Reply::AfterScrape
            } else {
                // Pre-flight rejection: the failure is already recorded.
                let error = match state.last_result() {
                    Some(ScrapeResult::Failed { reason }) => Some(reason.clone()),
                    _ => None,
                };
                Reply::Now(Response::Scrape {
                    success: error.is_none(),
                    error,
                })
            };
            (state, effects, reply)
        }
    }
}

/// Decide whether a trigger may enter `Scraping`. Rejections are terminal
/// failures recorded on the state; they never reach the engine.
fn begin_scrape(state: &mut AppState, url: Option<String>) -> Vec<Effect> {
    // Best-effort single-flight: a second trigger while scraping is dropped.
    if state.is_scraping() {
        return Vec::new();
    }

    let url = match url {
        Some(url) if !url.is_empty() => url,
        _ => {
            state.finish_scrape(ScrapeResult::Failed {
                reason: "No active tab found".to_string(),
            });
            return Vec::new();
        }
    };

    match Url::parse(&url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
            state.start_scrape(url.clone());
            vec![Effect::Scrape { url }]
        }
        Ok(parsed) => {
            state.finish_scrape(ScrapeResult::Failed {
                reason: format!("Cannot scrape restricted page ({}:)", parsed.scheme()),
            });
            Vec::new()
        }
        Err(err) => {
            state.finish_scrape(ScrapeResult::Failed {
                reason: format!("Invalid page URL: {err}"),
            });
            Vec::new()
        }
    }
}

fn persist_effect(state: &AppState) -> Effect {
    Effect::PersistSettings {
        sites: state.sites().entries().to_vec(),
        auto_scrape: state.auto_scrape(),
    }
}
