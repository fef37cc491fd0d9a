//! Session manager
//!
//! Holds the one authoritative copy of the token and user. Views receive a
//! clone of [`SessionManager`] and read from it; they react to login and
//! logout through [`SessionManager::subscribe`].

mod store;

pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::UserInfo;
use tokio::sync::watch;

/// Authenticated session. Token and user always travel together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: UserInfo,
}

struct Inner {
    state: watch::Sender<Option<AuthSession>>,
    store: Box<dyn SessionStore>,
}

/// Shared handle to the current session
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl SessionManager {
    /// Load the persisted session from `store`.
    ///
    /// An unreadable record is logged and treated as no session.
    pub fn restore(store: impl SessionStore + 'static) -> Self {
        let initial = match store.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Ignoring unreadable session: {}", e);
                None
            }
        };
        if let Some(session) = &initial {
            tracing::info!(user = %session.user.name, "Restored session");
        }

        let (state, _) = watch::channel(initial);
        Self {
            inner: Arc::new(Inner {
                state,
                store: Box::new(store),
            }),
        }
    }

    /// Session kept in memory only
    pub fn in_memory() -> Self {
        Self::restore(MemorySessionStore::new())
    }

    /// Snapshot of the current session
    pub fn current(&self) -> Option<AuthSession> {
        self.inner.state.borrow().clone()
    }

    /// Bearer token, if logged in
    pub fn token(&self) -> Option<String> {
        self.inner.state.borrow().as_ref().map(|s| s.token.clone())
    }

    /// Logged-in user, if any
    pub fn user(&self) -> Option<UserInfo> {
        self.inner.state.borrow().as_ref().map(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_some()
    }

    /// Whether admin-only actions should be offered
    pub fn is_admin(&self) -> bool {
        self.inner
            .state
            .borrow()
            .as_ref()
            .is_some_and(|s| s.user.is_admin())
    }

    /// Store a freshly issued session and notify subscribers.
    ///
    /// A failing store is logged; the in-memory session still applies.
    pub fn sign_in(&self, session: AuthSession) {
        if let Err(e) = self.inner.store.save(&session) {
            tracing::warn!("Failed to persist session: {}", e);
        }
        tracing::info!(user = %session.user.name, role = %session.user.role, "Signed in");
        self.inner.state.send_replace(Some(session));
    }

    /// Drop the session everywhere. Safe to call repeatedly.
    pub fn sign_out(&self) {
        if let Err(e) = self.inner.store.clear() {
            tracing::warn!("Failed to clear persisted session: {}", e);
        }
        if self.inner.state.send_replace(None).is_some() {
            tracing::info!("Signed out");
        }
    }

    /// Receiver that observes every sign-in and sign-out
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthSession>> {
        self.inner.state.subscribe()
    }
}
