//! services/client/src/adapters/token_file.rs
//!
//! This module contains the token storage adapter, which is the concrete
//! implementation of the `TokenStore` port from the `core` crate. It persists
//! the opaque bearer credential in a single file so a session survives
//! process restarts, the way browser local storage scopes it to an origin.

use galmaetgil_core::ports::{PortError, PortResult, TokenStore};
use std::io::ErrorKind;
use std::path::PathBuf;

/// A file-backed `TokenStore`.
#[derive(Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a new `FileTokenStore` persisting at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn save(&self, token: &str) -> PortResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PortError::Unexpected(e.to_string()))?;
        }
        std::fs::write(&self.path, token).map_err(|e| PortError::Unexpected(e.to_string()))
    }

    fn read(&self) -> PortResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PortError::Unexpected(e.to_string())),
        }
    }

    fn clear(&self) -> PortResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            // Clearing an absent token is a no-op.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PortError::Unexpected(e.to_string())),
        }
    }
}
