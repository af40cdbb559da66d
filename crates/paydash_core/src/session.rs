//! Session contract: whether a caller holds a credential, and which one.
//!
//! The store behind the credential belongs to the login flow. The core only
//! reads through a [`CredentialProvider`], so tests can supply fakes.

use std::fmt;
use std::sync::Arc;

/// Bearer token plus the subject (client id) it was issued to.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub subject: String,
}

impl Credential {
    pub fn new(token: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            subject: subject.into(),
        }
    }
}

// Keep tokens out of logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("subject", &self.subject)
            .finish()
    }
}

pub trait CredentialProvider: Send + Sync {
    fn current_credential(&self) -> Option<Credential>;
}

impl<F> CredentialProvider for F
where
    F: Fn() -> Option<Credential> + Send + Sync,
{
    fn current_credential(&self) -> Option<Credential> {
        self()
    }
}

/// Provider that always answers with the same credential (or none).
#[derive(Debug, Clone, Default)]
pub struct StaticCredential(pub Option<Credential>);

impl CredentialProvider for StaticCredential {
    fn current_credential(&self) -> Option<Credential> {
        self.0.clone()
    }
}

/// Read-only view over the process session.
#[derive(Clone)]
pub struct SessionGate {
    provider: Arc<dyn CredentialProvider>,
}

impl SessionGate {
    pub fn new(provider: Arc<dyn CredentialProvider>) -> Self {
        Self { provider }
    }

    pub fn current_credential(&self) -> Option<Credential> {
        self.provider
            .current_credential()
            .filter(|credential| !credential.token.trim().is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_credential().is_some()
    }

    pub fn provider(&self) -> Arc<dyn CredentialProvider> {
        self.provider.clone()
    }
}

impl CredentialProvider for SessionGate {
    fn current_credential(&self) -> Option<Credential> {
        SessionGate::current_credential(self)
    }
}
