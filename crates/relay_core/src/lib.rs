//! Relay core: pure allow-list and dispatcher state machine.
mod effect;
mod msg;
mod sites;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{Msg, Reply, Request, Response};
pub use sites::{normalize_site_pattern, SiteEntry, SiteList};
pub use state::{AppState, DispatchState, ScrapeResult};
pub use update::{handle_request, update};
pub use view_model::{SiteRowView, StatusView};
