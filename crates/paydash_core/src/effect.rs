use crate::{Feed, Generation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartPolling { feed: Feed, generation: Generation },
    StopPolling { feed: Feed },
    Quit,
}
