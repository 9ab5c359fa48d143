//! Where the current session (token + user) lives between calls

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ClientResult;
use crate::types::{Role, UserInfo};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: UserInfo,
}

pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<StoredSession>;
    fn save(&self, session: &StoredSession) -> ClientResult<()>;
    fn clear(&self) -> ClientResult<()>;

    fn token(&self) -> Option<String> {
        self.load().map(|s| s.token)
    }

    fn role(&self) -> Option<Role> {
        self.load().map(|s| s.user.role)
    }
}

/// Session kept for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    session: Mutex<Option<StoredSession>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryTokenStore {
    /// A poisoned lock still guards a whole value, so take it back.
    fn slot(&self) -> MutexGuard<'_, Option<StoredSession>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<StoredSession> {
        self.slot().clone()
    }

    fn save(&self, session: &StoredSession) -> ClientResult<()> {
        *self.slot() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.slot() = None;
        Ok(())
    }
}

/// Session persisted as JSON, by default at
/// `~/.local/share/staffdesk/session.json`
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> PathBuf {
        dirs_next::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("staffdesk")
            .join("session.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileTokenStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<StoredSession> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                None
            }
        }
    }

    fn save(&self, session: &StoredSession) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(session)?)?;
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn session() -> StoredSession {
        StoredSession {
            token: "tok".to_string(),
            user: UserInfo {
                id: "u1".to_string(),
                email: "ann@example.com".to_string(),
                role: Role::Manager,
                created_at: Utc::now(),
            },
        }
    }

    #[test]
    fn memory_store_survives_a_poisoned_lock() {
        let store = std::sync::Arc::new(MemoryTokenStore::new());
        let holder = std::sync::Arc::clone(&store);
        let joined = std::thread::spawn(move || {
            let _guard = holder.session.lock().unwrap();
            panic!("panicked while holding the session lock");
        })
        .join();
        assert!(joined.is_err());
        assert!(store.session.is_poisoned());

        let saved = session();
        store.save(&saved).unwrap();
        assert_eq!(store.load(), Some(saved));

        store.clear().unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn memory_store_round_trip_and_clear() {
        let store = MemoryTokenStore::new();
        assert!(store.token().is_none());
        store.save(&session()).unwrap();
        assert_eq!(store.token().as_deref(), Some("tok"));
        assert_eq!(store.role(), Some(Role::Manager));
        store.clear().unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn file_store_persists_across_instances() {
        let path = std::env::temp_dir()
            .join(format!("staffdesk-{}", uuid::Uuid::new_v4()))
            .join("session.json");

        let saved = session();
        FileTokenStore::new(&path).save(&saved).unwrap();
        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.load(), Some(saved));

        reopened.clear().unwrap();
        assert!(reopened.load().is_none());
        // clearing twice is fine
        reopened.clear().unwrap();
    }
}
