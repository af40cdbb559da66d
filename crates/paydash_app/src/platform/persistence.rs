use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use paydash_core::{Credential, CredentialProvider};
use paydash_logging::{dash_info, dash_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("could not encode session: {0}")]
    Encode(#[from] ron::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSession {
    token: String,
    subject: String,
}

/// Session credential kept in a ron file between runs.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Option<Credential> {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                dash_warn!("Failed to read session from {:?}: {}", self.path, err);
                return None;
            }
        };

        match ron::from_str::<PersistedSession>(&content) {
            Ok(session) => Some(Credential::new(session.token, session.subject)),
            Err(err) => {
                dash_warn!("Failed to parse session from {:?}: {}", self.path, err);
                None
            }
        }
    }

    pub fn save(&self, credential: &Credential) -> Result<(), PersistError> {
        let session = PersistedSession {
            token: credential.token.clone(),
            subject: credential.subject.clone(),
        };
        let content = ron::ser::to_string_pretty(&session, ron::ser::PrettyConfig::new())?;
        write_atomically(&self.path, &content)?;
        dash_info!("Saved session for {} to {:?}", credential.subject, self.path);
        Ok(())
    }

    /// Removes the stored session; returns whether there was one.
    pub fn clear(&self) -> Result<bool, PersistError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

impl CredentialProvider for FileCredentialStore {
    fn current_credential(&self) -> Option<Credential> {
        self.load()
    }
}

/// Writes through a temp file in the target directory, then renames over `path`.
fn write_atomically(path: &Path, content: &str) -> Result<(), PersistError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(path).map_err(|e| PersistError::Io(e.error))?;
    Ok(())
}
