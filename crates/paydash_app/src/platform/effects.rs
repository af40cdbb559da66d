use paydash_core::{Effect, Msg};
use paydash_engine::{EngineEvent, EngineHandle};
use paydash_logging::{dash_info, dash_warn};

/// Carries core effects out to the engine and engine events back in as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// Executes `effects`; returns `false` once a quit was requested.
    pub fn enqueue(&self, effects: Vec<Effect>) -> bool {
        let mut keep_running = true;
        for effect in effects {
            match effect {
                Effect::StartPolling { feed, generation } => {
                    dash_info!("StartPolling feed={:?} generation={}", feed, generation);
                    self.engine.start_polling(feed, generation);
                }
                Effect::StopPolling { feed } => {
                    dash_info!("StopPolling feed={:?}", feed);
                    self.engine.stop_polling(feed);
                }
                Effect::Quit => keep_running = false,
            }
        }
        keep_running
    }

    /// Engine events received since the last call, as messages.
    pub fn pending_msgs(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            match event {
                EngineEvent::FeedUpdated {
                    feed,
                    generation,
                    state,
                } => {
                    if let Some(failure) = state.failure() {
                        dash_warn!("Feed {:?} failed: {}", feed, failure);
                    }
                    msgs.push(Msg::FeedUpdated {
                        feed,
                        generation,
                        state,
                    });
                }
            }
        }
        msgs
    }

    pub fn shutdown(self) {
        self.engine.shutdown();
    }
}
