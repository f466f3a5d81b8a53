//! Persistence: the versioned state record and a JSON file store.
//!
//! DESIGN
//! ======
//! The stored record is `{ version, participants, settings }`. The wheel core
//! never touches storage; hosts load a record, hand its roster and settings
//! to [`crate::engine::WheelCore`], and save after edits.
//!
//! Lenient decoding ([`decode`]) never fails: unreadable or wrong-version
//! records fall back to the default state with a warning. Strict decoding
//! ([`decode_strict`]) reports why instead.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::STATE_VERSION;
use crate::participant::{Roster, Settings};

/// Everything persisted between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredState {
    pub version: u32,
    pub participants: Roster,
    pub settings: Settings,
}

impl Default for StoredState {
    fn default() -> Self {
        Self { version: STATE_VERSION, participants: Roster::new(), settings: Settings::default() }
    }
}

impl StoredState {
    /// Replace the roster with fresh participants named in `raw` (comma-separated), keeping settings.
    #[must_use]
    pub fn with_participant_names(self, raw: &str) -> Self {
        Self { participants: Roster::from_names(raw), ..self }
    }
}

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid state JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported state version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("state file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

// =============================================================================
// CODEC
// =============================================================================

/// Parse a stored record, rejecting malformed JSON and unknown versions.
///
/// # Errors
///
/// Returns [`StorageError::Json`] or [`StorageError::UnsupportedVersion`].
pub fn decode_strict(raw: &str) -> Result<StoredState, StorageError> {
    let state: StoredState = serde_json::from_str(raw)?;
    if state.version != STATE_VERSION {
        return Err(StorageError::UnsupportedVersion { found: state.version, expected: STATE_VERSION });
    }
    Ok(state)
}

/// Parse a stored record, falling back to the default state on any problem.
#[must_use]
pub fn decode(raw: &str) -> StoredState {
    match decode_strict(raw) {
        Ok(state) => state,
        Err(e) => {
            warn!(error = %e, "unusable stored state; using defaults");
            StoredState::default()
        }
    }
}

/// Serialize a record as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`StorageError::Json`] if serialization fails.
pub fn encode(state: &StoredState) -> Result<String, StorageError> {
    Ok(serde_json::to_string_pretty(state)?)
}

// =============================================================================
// FILE STORE
// =============================================================================

/// A state record kept in one JSON file.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record. A missing file yields the default state; bad contents
    /// fall back as in [`decode`].
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the file exists but cannot be read.
    pub fn load(&self) -> Result<StoredState, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(decode(&raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no state file; using defaults");
                Ok(StoredState::default())
            }
            Err(source) => Err(StorageError::Io { path: self.path.clone(), source }),
        }
    }

    /// Write the record, replacing any previous contents.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the file cannot be written.
    pub fn save(&self, state: &StoredState) -> Result<(), StorageError> {
        let raw = encode(state)?;
        fs::write(&self.path, raw).map_err(|source| StorageError::Io { path: self.path.clone(), source })?;
        debug!(path = %self.path.display(), participants = state.participants.len(), "state saved");
        Ok(())
    }
}
