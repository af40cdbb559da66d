//! Periodic authenticated polling of one endpoint.
//!
//! A [`PollHandle`] owns one subscription. Cycles run one after another on the
//! task, so a slow fetch makes the ticker skip rather than overlap. Every
//! cycle records the handle's epoch when it is issued; `stop` bumps the epoch
//! while holding the delivery lock, so a fetch that resolves afterwards finds a
//! stale epoch and its result is dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use paydash_core::{Credential, CredentialProvider, FetchFailure, FetchState};
use paydash_logging::{dash_debug, dash_info, dash_warn};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::fetch::{Endpoint, Fetcher};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

type UpdateSink = Box<dyn FnMut(FetchState) + Send>;

struct PollShared {
    epoch: AtomicU64,
    cancel: CancellationToken,
    sink: Mutex<Option<UpdateSink>>,
}

impl PollShared {
    fn new(sink: UpdateSink) -> Self {
        Self {
            epoch: AtomicU64::new(0),
            cancel: CancellationToken::new(),
            sink: Mutex::new(Some(sink)),
        }
    }

    fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    /// Hands `state` to the consumer unless the handle moved past `issued_epoch`.
    fn deliver(&self, issued_epoch: u64, state: FetchState) -> bool {
        let mut guard = match self.sink.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if self.current_epoch() != issued_epoch {
            return false;
        }
        match guard.as_mut() {
            Some(sink) => {
                sink(state);
                true
            }
            None => false,
        }
    }

    fn stop(&self) -> bool {
        let mut guard = match self.sink.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let was_live = guard.take().is_some();
        self.epoch.fetch_add(1, Ordering::AcqRel);
        drop(guard);
        self.cancel.cancel();
        was_live
    }
}

/// Starts poll subscriptions on a tokio runtime.
#[derive(Clone)]
pub struct Poller {
    fetcher: Arc<dyn Fetcher>,
    runtime: Handle,
}

impl Poller {
    pub fn new(fetcher: Arc<dyn Fetcher>, runtime: Handle) -> Self {
        Self { fetcher, runtime }
    }

    /// Begins polling `endpoint` every `interval`, reporting each cycle to `on_update`.
    ///
    /// Without a credential, `on_update` receives a single missing-credential
    /// failure before this returns, and nothing is scheduled.
    ///
    /// `on_update` runs under the handle's delivery lock and must not call
    /// [`PollHandle::stop`] on the same handle.
    pub fn start<F>(
        &self,
        endpoint: Endpoint,
        credentials: &dyn CredentialProvider,
        interval: Duration,
        on_update: F,
    ) -> PollHandle
    where
        F: FnMut(FetchState) + Send + 'static,
    {
        let shared = Arc::new(PollShared::new(Box::new(on_update)));

        let Some(credential) = credentials.current_credential() else {
            dash_warn!("not polling {}: no credential", endpoint.url);
            shared.deliver(
                shared.current_epoch(),
                FetchState::Failure(FetchFailure::missing_credential()),
            );
            shared.stop();
            return PollHandle { shared, task: None };
        };

        dash_info!(
            "polling {} every {} ms",
            endpoint.url,
            interval.as_millis()
        );
        let task = self.runtime.spawn(run_cycles(
            shared.clone(),
            self.fetcher.clone(),
            endpoint,
            credential,
            interval.max(MIN_POLL_INTERVAL),
        ));
        PollHandle {
            shared,
            task: Some(task),
        }
    }
}

async fn run_cycles(
    shared: Arc<PollShared>,
    fetcher: Arc<dyn Fetcher>,
    endpoint: Endpoint,
    credential: Credential,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut cycle: u64 = 0;

    loop {
        tokio::select! {
            biased;
            _ = shared.cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        cycle += 1;
        let issued_epoch = shared.current_epoch();
        let result = fetcher.fetch(&endpoint, &credential).await;
        if let Err(failure) = &result {
            dash_warn!("poll cycle {} of {} failed: {}", cycle, endpoint.url, failure);
        }
        if !shared.deliver(issued_epoch, FetchState::from(result)) {
            dash_debug!("discarded stale result of cycle {} for {}", cycle, endpoint.url);
            break;
        }
    }
    dash_debug!("poll loop for {} ended after {} cycles", endpoint.url, cycle);
}

/// One active poll subscription. Stopping is idempotent and also happens on drop.
pub struct PollHandle {
    shared: Arc<PollShared>,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Prevents any further updates. An in-flight fetch may finish, but its result is dropped.
    pub fn stop(&self) {
        if self.shared.stop() {
            dash_debug!("poll handle stopped");
        }
    }

    /// Whether a poll task was spawned for this handle.
    pub fn is_scheduled(&self) -> bool {
        self.task.is_some()
    }

    pub fn is_stopped(&self) -> bool {
        self.shared.cancel.is_cancelled()
    }

    /// Whether the poll task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
