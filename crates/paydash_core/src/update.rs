use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ViewOpened(view) => {
            if state.active_view() == Some(view) {
                return (state, Vec::new());
            }
            let stopped = state.close_view();
            let generation = state.open_view(view);
            let mut effects = Vec::with_capacity(stopped.len() + view.feeds().len());
            effects.extend(stopped.iter().map(|&feed| Effect::StopPolling { feed }));
            effects.extend(
                view.feeds()
                    .iter()
                    .map(|&feed| Effect::StartPolling { feed, generation }),
            );
            effects
        }
        Msg::ViewClosed => state
            .close_view()
            .iter()
            .map(|&feed| Effect::StopPolling { feed })
            .collect(),
        Msg::FeedUpdated {
            feed,
            generation,
            state: fetched,
        } => {
            state.apply_feed(feed, generation, fetched);
            Vec::new()
        }
        Msg::SessionResolved { subject } => {
            state.set_subject(subject);
            Vec::new()
        }
        Msg::QuitRequested => {
            let mut effects: Vec<Effect> = state
                .close_view()
                .iter()
                .map(|&feed| Effect::StopPolling { feed })
                .collect();
            effects.push(Effect::Quit);
            effects
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}
