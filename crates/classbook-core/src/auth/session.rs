use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use tracing::warn;

use crate::models::UserProfile;

/// Token file name in the store directory
const TOKEN_FILE: &str = "token";

/// Profile file name in the store directory
const USER_FILE: &str = "user.json";

/// Durable storage for the authentication session.
///
/// A store holds exactly two entries: the opaque bearer token and the
/// JSON-serialized profile of the user it was issued for. Reads never fail -
/// a missing or unreadable entry is reported as absent. Writes go to the
/// persistence medium and can fail.
///
/// The store owns the session. Callers keep at most a read-only copy of the
/// profile for display and write changes back through [`SessionStore::set_user`].
pub trait SessionStore: Send + Sync {
    /// Return the persisted token, if any.
    fn token(&self) -> Option<String>;

    /// Overwrite the persisted token unconditionally.
    fn set_token(&self, token: &str) -> Result<()>;

    /// Delete the persisted token. Removing an absent token is not an error.
    fn remove_token(&self) -> Result<()>;

    /// Return the persisted profile, if any. Malformed stored data reads as
    /// absent rather than failing the caller.
    fn user(&self) -> Option<UserProfile>;

    /// Serialize and overwrite the persisted profile.
    fn set_user(&self, user: &UserProfile) -> Result<()>;

    /// Delete the persisted profile. Idempotent.
    fn remove_user(&self) -> Result<()>;

    /// Whether a token is currently persisted. Presence check only - the
    /// token is not validated against the backend.
    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Remove token and profile together (logout, expired session).
    fn clear(&self) -> Result<()> {
        self.remove_token()?;
        self.remove_user()
    }
}

/// File-backed session store.
///
/// Persists the two entries as files in `dir`, surviving restarts. Writes
/// are last-write-wins; racing writers (a rejected-token clear against a
/// manual logout) converge on the same state without coordination.
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create session directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn user_path(&self) -> PathBuf {
        self.dir.join(USER_FILE)
    }

    fn remove_entry(path: PathBuf) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<String> {
        std::fs::read_to_string(self.token_path()).ok()
    }

    fn set_token(&self, token: &str) -> Result<()> {
        std::fs::write(self.token_path(), token).context("Failed to write session token")
    }

    fn remove_token(&self) -> Result<()> {
        Self::remove_entry(self.token_path())
    }

    fn user(&self) -> Option<UserProfile> {
        let contents = std::fs::read_to_string(self.user_path()).ok()?;
        match serde_json::from_str(&contents) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Ignoring malformed stored user profile");
                None
            }
        }
    }

    fn set_user(&self, user: &UserProfile) -> Result<()> {
        let contents = serde_json::to_string_pretty(user)?;
        std::fs::write(self.user_path(), contents).context("Failed to write user profile")
    }

    fn remove_user(&self) -> Result<()> {
        Self::remove_entry(self.user_path())
    }
}

/// In-memory session store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<MemorySlot>,
}

#[derive(Default)]
struct MemorySlot {
    token: Option<String>,
    user: Option<UserProfile>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, MemorySlot> {
        // A poisoned lock still holds valid last-write-wins state
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.slot().token.clone()
    }

    fn set_token(&self, token: &str) -> Result<()> {
        self.slot().token = Some(token.to_string());
        Ok(())
    }

    fn remove_token(&self) -> Result<()> {
        self.slot().token = None;
        Ok(())
    }

    fn user(&self) -> Option<UserProfile> {
        self.slot().user.clone()
    }

    fn set_user(&self, user: &UserProfile) -> Result<()> {
        self.slot().user = Some(user.clone());
        Ok(())
    }

    fn remove_user(&self) -> Result<()> {
        self.slot().user = None;
        Ok(())
    }
}
