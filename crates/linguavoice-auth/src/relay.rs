use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use uuid::Uuid;

/// Outcome of polling a relay session for its credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collect {
    /// Credential delivered; the session no longer exists
    Ready(String),
    /// Session exists but nothing has been published yet
    Pending,
    /// Session unknown, expired, or already consumed
    NotFound,
}

/// The relay session key was unknown or expired
#[derive(Debug, thiserror::Error)]
#[error("relay session not found or expired")]
pub struct SessionNotFound;

/// Rendezvous store coordinating a cross-context login handoff
///
/// One browser context completes the hosted login flow and publishes the
/// resulting credential; the originating client polls with the same key
/// until the credential arrives or the session expires. Implementations
/// must keep each operation atomic under concurrent callers.
#[async_trait]
pub trait TokenRelay: Send + Sync {
    /// Create a session and return its unguessable key
    async fn begin(&self) -> String;

    /// Attach a credential to an open session
    ///
    /// A second publish before collection overwrites the credential;
    /// last write wins.
    async fn publish(&self, key: &str, token: String) -> Result<(), SessionNotFound>;

    /// Poll a session, consuming it when the credential is present
    ///
    /// Never blocks waiting for a publish; absence is reported as
    /// [`Collect::Pending`] and the caller retries on its own interval.
    async fn collect(&self, key: &str) -> Collect;
}

struct RelaySession {
    token: Option<String>,
    created_at: Instant,
}

/// In-memory [`TokenRelay`] behind a single mutex
///
/// The lock guards purge, lookup, mutation, and deletion as one step, so
/// two collectors racing a publish can never both see the credential.
pub struct MemoryRelay {
    sessions: Mutex<HashMap<String, RelaySession>>,
    ttl: Duration,
}

impl MemoryRelay {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Drop sessions past their lifetime; called at the top of every
    /// operation while the lock is held
    fn purge(sessions: &mut HashMap<String, RelaySession>, ttl: Duration) {
        sessions.retain(|_, session| session.created_at.elapsed() <= ttl);
    }

    fn collect_locked(sessions: &mut HashMap<String, RelaySession>, key: &str) -> Collect {
        let has_token = match sessions.get(key) {
            None => return Collect::NotFound,
            Some(session) => session.token.is_some(),
        };

        if !has_token {
            return Collect::Pending;
        }

        // Removal under the same lock acquisition as the lookup is the
        // one-time-consumption guarantee.
        sessions
            .remove(key)
            .and_then(|session| session.token)
            .map_or(Collect::NotFound, Collect::Ready)
    }
}

#[async_trait]
impl TokenRelay for MemoryRelay {
    async fn begin(&self) -> String {
        let key = Uuid::new_v4().simple().to_string();

        let mut sessions = self.sessions.lock();
        Self::purge(&mut sessions, self.ttl);
        sessions.insert(
            key.clone(),
            RelaySession {
                token: None,
                created_at: Instant::now(),
            },
        );
        drop(sessions);

        tracing::debug!("relay session created");

        key
    }

    async fn publish(&self, key: &str, token: String) -> Result<(), SessionNotFound> {
        let mut sessions = self.sessions.lock();
        Self::purge(&mut sessions, self.ttl);

        match sessions.get_mut(key) {
            Some(session) => {
                session.token = Some(token);
                Ok(())
            }
            None => Err(SessionNotFound),
        }
    }

    async fn collect(&self, key: &str) -> Collect {
        let mut sessions = self.sessions.lock();
        Self::purge(&mut sessions, self.ttl);
        Self::collect_locked(&mut sessions, key)
    }
}
