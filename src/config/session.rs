// ABOUTME: Persisted login session (email, access token, refresh token)
// ABOUTME: JSON file under the user config directory with owner-only permissions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::env_vars;
use crate::constants::service_names::NUTRITION_DIARY;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the session file inside the application config directory
const SESSION_FILE_NAME: &str = "config.json";

/// Credentials kept between runs
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    /// Access token
    #[serde(default)]
    pub token: String,
    /// Account email
    #[serde(default)]
    pub email: String,
    /// Refresh token, when the service issued one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl StoredSession {
    /// Whether an access token is present
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        !self.token.is_empty()
    }
}

impl std::fmt::Debug for StoredSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredSession")
            .field("email", &self.email)
            .field("token", &"[REDACTED]")
            .field("has_refresh_token", &self.refresh_token.is_some())
            .finish()
    }
}

/// Reads and writes the session file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store backed by an explicit file path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location: the session-file override if set,
    /// otherwise `<config_dir>/nutrition-diary/config.json`
    ///
    /// # Errors
    ///
    /// Returns a config error when no user config directory can be determined
    pub fn default_location() -> AppResult<Self> {
        if let Some(path) = env::var_os(env_vars::SESSION_FILE).filter(|p| !p.is_empty()) {
            return Ok(Self::new(path));
        }
        let dir = dirs::config_dir()
            .ok_or_else(|| AppError::config("could not determine user config directory"))?;
        Ok(Self::new(dir.join(NUTRITION_DIARY).join(SESSION_FILE_NAME)))
    }

    /// Location of the session file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session; a missing file is an empty session
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be read, or a serialization
    /// error if it is not valid JSON
    pub fn load(&self) -> AppResult<StoredSession> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no session file");
                Ok(StoredSession::default())
            }
            Err(e) => Err(AppError::storage(format!(
                "failed to read {}: {e}",
                self.path.display()
            ))
            .with_source(e)),
        }
    }

    /// Write the session, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns a storage error if the directory or file cannot be written
    pub fn save(&self, session: &StoredSession) -> AppResult<()> {
        if let Some(dir) = self.path.parent() {
            create_private_dir(dir)?;
        }
        let data = serde_json::to_vec(session)?;
        fs::write(&self.path, data).map_err(|e| {
            AppError::storage(format!("failed to write {}: {e}", self.path.display()))
                .with_source(e)
        })?;
        restrict_to_owner(&self.path)?;
        info!(path = %self.path.display(), email = %session.email, "session saved");
        Ok(())
    }

    /// Remove the session file; a missing file is not an error
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file exists but cannot be removed
    pub fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(format!(
                "failed to remove {}: {e}",
                self.path.display()
            ))
            .with_source(e)),
        }
    }
}

fn create_private_dir(dir: &Path) -> AppResult<()> {
    fs::create_dir_all(dir).map_err(|e| {
        AppError::storage(format!("failed to create {}: {e}", dir.display())).with_source(e)
    })?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

fn restrict_to_owner(path: &Path) -> AppResult<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}
