use std::fmt;

use thiserror::Error;

use crate::Record;

/// Lifecycle of one polled feed.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Success(Vec<Record>),
    Failure(FetchFailure),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn records(&self) -> Option<&[Record]> {
        match self {
            FetchState::Success(records) => Some(records),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            FetchState::Failure(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<Result<Vec<Record>, FetchFailure>> for FetchState {
    fn from(result: Result<Vec<Record>, FetchFailure>) -> Self {
        match result {
            Ok(records) => FetchState::Success(records),
            Err(failure) => FetchState::Failure(failure),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn missing_credential() -> Self {
        Self::new(FailureKind::MissingCredential, "no token in session")
    }

    pub fn no_data() -> Self {
        Self::new(FailureKind::MalformedPayload, "no data")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    MissingCredential,
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
    MalformedPayload,
}

impl FailureKind {
    /// Transport errors and non-2xx statuses.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            FailureKind::HttpStatus(_)
                | FailureKind::Timeout
                | FailureKind::TooLarge { .. }
                | FailureKind::Network
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::MissingCredential => write!(f, "missing credential"),
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedPayload => write!(f, "malformed payload"),
        }
    }
}
