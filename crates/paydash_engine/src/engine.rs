use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use paydash_core::{CredentialProvider, Feed, FetchState, Generation};
use paydash_logging::{dash_error, dash_info};
use tokio::sync::mpsc as async_mpsc;

use crate::fetch::{Endpoint, FetchSettings, Fetcher, ReqwestFetcher};
use crate::poll::{PollHandle, Poller, DEFAULT_POLL_INTERVAL};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub base_url: String,
    pub poll_interval: Duration,
    pub fetch: FetchSettings,
}

impl EngineConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            fetch: FetchSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A poll result, tagged with the generation passed to `start_polling`.
    FeedUpdated {
        feed: Feed,
        generation: Generation,
        state: FetchState,
    },
}

enum EngineCommand {
    StartPolling { feed: Feed, generation: Generation },
    StopPolling { feed: Feed },
    Shutdown,
}

/// Runs every poll subscription on one dedicated thread.
pub struct EngineHandle {
    cmd_tx: async_mpsc::UnboundedSender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    worker: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig, credentials: Arc<dyn CredentialProvider>) -> Self {
        let fetcher: Arc<dyn Fetcher> = Arc::new(ReqwestFetcher::new(config.fetch.clone()));
        Self::with_fetcher(config, credentials, fetcher)
    }

    pub fn with_fetcher(
        config: EngineConfig,
        credentials: Arc<dyn CredentialProvider>,
        fetcher: Arc<dyn Fetcher>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = async_mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();

        let worker = thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    dash_error!("failed to start engine runtime: {}", err);
                    return;
                }
            };
            let poller = Poller::new(fetcher, runtime.handle().clone());
            runtime.block_on(serve_commands(
                config,
                credentials,
                poller,
                cmd_rx,
                event_tx,
            ));
        });

        Self {
            cmd_tx,
            event_rx,
            worker: Some(worker),
        }
    }

    pub fn start_polling(&self, feed: Feed, generation: Generation) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::StartPolling { feed, generation });
    }

    pub fn stop_polling(&self, feed: Feed) {
        let _ = self.cmd_tx.send(EngineCommand::StopPolling { feed });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Stops every subscription and waits for the engine thread to exit.
    pub fn shutdown(mut self) {
        self.shutdown_inner();
    }

    fn shutdown_inner(&mut self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown_inner();
    }
}

async fn serve_commands(
    config: EngineConfig,
    credentials: Arc<dyn CredentialProvider>,
    poller: Poller,
    mut cmd_rx: async_mpsc::UnboundedReceiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let mut handles: HashMap<Feed, PollHandle> = HashMap::new();

    while let Some(command) = cmd_rx.recv().await {
        match command {
            EngineCommand::StartPolling { feed, generation } => {
                // One subscription per feed: release the old one before replacing it.
                if let Some(previous) = handles.remove(&feed) {
                    previous.stop();
                }
                let endpoint = Endpoint::for_feed(&config.base_url, feed);
                let tx = event_tx.clone();
                let handle = poller.start(
                    endpoint,
                    credentials.as_ref(),
                    config.poll_interval,
                    move |state| {
                        let _ = tx.send(EngineEvent::FeedUpdated {
                            feed,
                            generation,
                            state,
                        });
                    },
                );
                handles.insert(feed, handle);
            }
            EngineCommand::StopPolling { feed } => {
                if let Some(handle) = handles.remove(&feed) {
                    handle.stop();
                }
            }
            EngineCommand::Shutdown => break,
        }
    }

    for (_, handle) in handles.drain() {
        handle.stop();
    }
    dash_info!("engine stopped");
}
