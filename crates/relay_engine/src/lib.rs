//! Relay engine: IO pipeline and effect execution.
mod engine;
mod extract;
mod fetch;
mod transport;
mod types;

pub use engine::{EngineConfig, EngineHandle};
pub use extract::{ExtractedText, Extractor, VisibleTextExtractor};
pub use fetch::{FetchSettings, LoadedPage, PageSource, ReqwestPageSource};
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    EngineEvent, RequestId, ScrapeError, ScrapeRecord, SendOutcome, CONTENT_CHAR_LIMIT,
};
