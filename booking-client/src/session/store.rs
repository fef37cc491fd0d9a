//! Session persistence
//!
//! The session survives restarts through a small JSON record kept under
//! two fixed keys, `authToken` and `currentUser`.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use shared::UserInfo;

use super::AuthSession;
use crate::ClientResult;

/// Storage backend for the current session
pub trait SessionStore: Send + Sync {
    /// Load the stored session. A record missing either key is no session.
    fn load(&self) -> ClientResult<Option<AuthSession>>;

    /// Persist the session, replacing whatever was stored
    fn save(&self, session: &AuthSession) -> ClientResult<()>;

    /// Remove the stored session. Clearing an empty store is not an error.
    fn clear(&self) -> ClientResult<()>;
}

/// On-disk layout of the session record
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedSession {
    #[serde(rename = "authToken", default)]
    auth_token: Option<String>,
    #[serde(rename = "currentUser", default)]
    current_user: Option<UserInfo>,
}

impl PersistedSession {
    fn into_session(self) -> Option<AuthSession> {
        match (self.auth_token, self.current_user) {
            (Some(token), Some(user)) if !token.is_empty() => Some(AuthSession { token, user }),
            _ => None,
        }
    }
}

/// JSON file store (e.g. `.booking/session.json`)
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> ClientResult<Option<AuthSession>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let record: PersistedSession = serde_json::from_str(&content)?;
        Ok(record.into_session())
    }

    fn save(&self, session: &AuthSession) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let record = PersistedSession {
            auth_token: Some(session.token.clone()),
            current_user: Some(session.user.clone()),
        };
        let content = serde_json::to_string_pretty(&record)?;
        std::fs::write(&self.path, content)?;
        tracing::debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            tracing::debug!(path = %self.path.display(), "Session file removed");
        }
        Ok(())
    }
}

/// Process-local store, nothing survives a restart
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<AuthSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already stored session
    pub fn with_session(session: AuthSession) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> ClientResult<Option<AuthSession>> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, session: &AuthSession) -> ClientResult<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
