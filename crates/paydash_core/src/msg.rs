use crate::{Feed, FetchState, Generation, View};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User navigated to a view; its feeds start polling.
    ViewOpened(View),
    /// User left the current view; its feeds stop polling.
    ViewClosed,
    /// Latest poll result for a feed, tagged with the generation that started it.
    FeedUpdated {
        feed: Feed,
        generation: Generation,
        state: FetchState,
    },
    /// Subject of the current session, if any.
    SessionResolved { subject: Option<String> },
    /// User asked to quit.
    QuitRequested,
    /// Render tick to coalesce output.
    Tick,
}
