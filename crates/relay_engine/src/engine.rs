use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use relay_logging::{relay_info, relay_warn};

use crate::extract::{Extractor, VisibleTextExtractor};
use crate::fetch::{FetchSettings, PageSource, ReqwestPageSource};
use crate::transport::{ReqwestTransport, Transport};
use crate::{EngineEvent, RequestId, ScrapeError, ScrapeRecord, SendOutcome};

pub struct EngineConfig {
    pub endpoint: String,
    pub fetch: FetchSettings,
    /// Inserted before extraction to let dynamic page content settle.
    pub settle_delay: Duration,
    /// ISO-8601 clock injected by the application layer.
    pub now_utc: Arc<dyn Fn() -> String + Send + Sync>,
}

impl EngineConfig {
    pub fn default_with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            fetch: FetchSettings::default(),
            settle_delay: Duration::from_secs(1),
            now_utc: Arc::new(String::new),
        }
    }
}

/// The load -> extract -> post chain for one scrape attempt. Runs to
/// completion or first failure; nothing is retried.
pub(crate) struct Pipeline {
    source: Arc<dyn PageSource>,
    extractor: Arc<dyn Extractor>,
    transport: Arc<dyn Transport>,
    now_utc: Arc<dyn Fn() -> String + Send + Sync>,
    user_agent: String,
}

impl Pipeline {
    pub(crate) async fn run(&self, url: &str) -> Result<SendOutcome, ScrapeError> {
        let page = self.source.load(url).await?;
        let extracted = self.extractor.extract(&page.html);
        if extracted.content.is_empty() {
            return Err(ScrapeError::EmptyContent);
        }

        let record = ScrapeRecord::new(
            page.final_url,
            extracted.title.unwrap_or_default(),
            extracted.content,
            (self.now_utc)(),
            self.user_agent.clone(),
        );
        let content_chars = record.content.chars().count();

        self.transport.post(&record).await?;
        relay_info!("Page data sent successfully: {}", record.url);
        Ok(SendOutcome {
            url: record.url,
            content_chars,
        })
    }
}

enum EngineCommand {
    Scrape { request_id: RequestId, url: String },
}

/// Owns a background thread with a tokio runtime; commands go in over a
/// channel, [`EngineEvent`]s come back out.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, ScrapeError> {
        let transport = ReqwestTransport::new(config.endpoint.clone())?;
        let source = ReqwestPageSource::new(config.fetch.clone());
        Ok(Self::with_parts(
            config,
            Arc::new(source),
            Arc::new(VisibleTextExtractor),
            Arc::new(transport),
        ))
    }

    pub fn with_parts(
        config: EngineConfig,
        source: Arc<dyn PageSource>,
        extractor: Arc<dyn Extractor>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let settle_delay = config.settle_delay;
        let pipeline = Arc::new(Pipeline {
            source,
            extractor,
            transport,
            now_utc: config.now_utc,
            user_agent: config.fetch.user_agent,
        });

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    relay_warn!("Engine runtime failed to start: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let pipeline = pipeline.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(&pipeline, command, settle_delay, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn scrape(&self, request_id: RequestId, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Scrape {
            request_id,
            url: url.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Block until the next event; `None` once the engine thread is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }
}

async fn handle_command(
    pipeline: &Pipeline,
    command: EngineCommand,
    settle_delay: Duration,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Scrape { request_id, url } => {
            let _ = event_tx.send(EngineEvent::Started {
                request_id,
                url: url.clone(),
            });
            tokio::time::sleep(settle_delay).await;

            let result = pipeline.run(&url).await;
            if let Err(err) = &result {
                relay_warn!("Scrape of {} failed: {}", url, err);
            }
            let _ = event_tx.send(EngineEvent::Completed { request_id, result });
        }
    }
}
