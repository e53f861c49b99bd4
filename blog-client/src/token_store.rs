use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::User;

/// The credentials a client holds between calls: the bearer token and the
/// public user view it was issued for. The CLI analog of the browser's
/// durable local storage, kept as a small JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location in the working directory.
    pub fn default_path() -> Self {
        Self::new(".blog_session")
    }

    pub fn save(&self, session: &Session) -> std::io::Result<()> {
        let json = serde_json::to_string(session)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)
    }

    /// `None` when nothing is stored or the file is unreadable; a stale or
    /// corrupt session is treated as logged out.
    pub fn load(&self) -> Option<Session> {
        let raw = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    pub fn clear(&self) -> std::io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
