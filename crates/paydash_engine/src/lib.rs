//! Paydash engine: HTTP fetching and poll scheduling.
mod engine;
mod fetch;
mod login;
mod payload;
mod poll;

pub use engine::{EngineConfig, EngineEvent, EngineHandle};
pub use fetch::{Endpoint, FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_CREDENTIAL_PARAM};
pub use payload::extract_records;
pub use poll::{PollHandle, Poller, DEFAULT_POLL_INTERVAL};
