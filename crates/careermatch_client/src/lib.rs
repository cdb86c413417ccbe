//! CareerMatch client: backend API access, request execution and session persistence.
mod client;
mod engine;
mod persist;
mod session;
mod types;
mod wire;

pub use client::{ApiClient, ApiSettings, ReqwestApiClient};
pub use engine::{EngineHandle, EventSink};
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};
pub use session::{
    Clock, MemoryBackend, SessionBackend, SessionError, SessionStore, StoredSession,
};
pub use types::{ApiError, ApiErrorKind, ApiEvent};
