use std::sync::Arc;

use careermatch_core::AccessToken;
use careermatch_logging::{cm_info, cm_warn};
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::PersistError;

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to persist session: {0}")]
    Persist(#[from] PersistError),
    #[error("failed to encode session: {0}")]
    Encode(String),
}

/// The single persisted session: one token and when it was issued.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub token: String,
    pub issued_at: DateTime<Utc>,
}

impl std::fmt::Debug for StoredSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredSession")
            .field("token", &careermatch_logging::redacted(&self.token))
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

impl StoredSession {
    pub fn is_expired(&self, now: DateTime<Utc>, max_age: Option<Duration>) -> bool {
        match max_age {
            Some(max_age) => now - self.issued_at >= max_age,
            None => false,
        }
    }
}

/// Where a session lives between runs.
pub trait SessionBackend: Send {
    fn load(&self) -> Result<Option<StoredSession>, SessionError>;
    fn save(&mut self, session: &StoredSession) -> Result<(), SessionError>;
    fn remove(&mut self) -> Result<(), SessionError>;
}

/// Keeps the current session in memory only.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    slot: Option<StoredSession>,
    writes: usize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls observed.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SessionBackend for MemoryBackend {
    fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        Ok(self.slot.clone())
    }

    fn save(&mut self, session: &StoredSession) -> Result<(), SessionError> {
        self.slot = Some(session.clone());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self) -> Result<(), SessionError> {
        self.slot = None;
        Ok(())
    }
}

/// Owns the access token. At most one token is held; `set` overwrites.
pub struct SessionStore<B> {
    backend: B,
    max_age: Option<Duration>,
    clock: Clock,
}

impl<B: SessionBackend> SessionStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            max_age: None,
            clock: Arc::new(Utc::now),
        }
    }

    /// Tokens older than `max_age` are treated as absent and cleared on read.
    pub fn with_max_age(mut self, max_age: Option<Duration>) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn get(&mut self) -> Result<Option<AccessToken>, SessionError> {
        let Some(session) = self.backend.load()? else {
            return Ok(None);
        };
        if session.is_expired((self.clock)(), self.max_age) {
            cm_warn!("Stored session issued at {} has expired", session.issued_at);
            self.backend.remove()?;
            return Ok(None);
        }
        Ok(Some(AccessToken::new(session.token)))
    }

    pub fn set(&mut self, token: AccessToken) -> Result<(), SessionError> {
        let session = StoredSession {
            token: token.into_inner(),
            issued_at: (self.clock)(),
        };
        self.backend.save(&session)?;
        cm_info!("Session stored ({:?})", session);
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.backend.remove()?;
        cm_info!("Session cleared");
        Ok(())
    }
}
