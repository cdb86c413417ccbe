use std::path::{Path, PathBuf};

use careermatch_client::{AtomicFileWriter, SessionBackend, SessionError, StoredSession};
use careermatch_logging::{cm_info, cm_warn};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub(crate) const SESSION_FILENAME: &str = "session.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSession {
    token: String,
    issued_at: DateTime<Utc>,
}

/// Session persisted as a RON document in the state directory.
#[derive(Debug, Clone)]
pub(crate) struct RonFileBackend {
    writer: AtomicFileWriter,
}

impl RonFileBackend {
    pub(crate) fn new(state_dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(state_dir),
        }
    }

    fn path(&self) -> PathBuf {
        self.writer.path(SESSION_FILENAME)
    }
}

impl SessionBackend for RonFileBackend {
    fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        let path = self.path();
        let content = match self.writer.read(SESSION_FILENAME) {
            Ok(Some(text)) => text,
            Ok(None) => return Ok(None),
            Err(err) => {
                cm_warn!("Failed to read persisted session from {:?}: {}", path, err);
                return Ok(None);
            }
        };

        // An unreadable document is treated as signed out rather than fatal.
        let persisted: PersistedSession = match ron::from_str(&content) {
            Ok(session) => session,
            Err(err) => {
                cm_warn!("Failed to parse persisted session from {:?}: {}", path, err);
                return Ok(None);
            }
        };

        cm_info!("Loaded persisted session from {:?}", path);
        Ok(Some(StoredSession {
            token: persisted.token,
            issued_at: persisted.issued_at,
        }))
    }

    fn save(&mut self, session: &StoredSession) -> Result<(), SessionError> {
        let persisted = PersistedSession {
            token: session.token.clone(),
            issued_at: session.issued_at,
        };
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(&persisted, pretty)
            .map_err(|err| SessionError::Encode(err.to_string()))?;
        self.writer.write(SESSION_FILENAME, &content)?;
        Ok(())
    }

    fn remove(&mut self) -> Result<(), SessionError> {
        self.writer.remove(SESSION_FILENAME)?;
        Ok(())
    }
}

pub(crate) fn session_path(state_dir: &Path) -> PathBuf {
    state_dir.join(SESSION_FILENAME)
}
