//! Session-scoped table storage.
//!
//! State lives outside the process, keyed by session id: it is created on
//! demand, read back on every request, and removed when the session is
//! cleared.

use std::fmt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::{DataFrame, IpcReader, IpcWriter, SerReader, SerWriter};
use rand::Rng;

use crate::error::{Result, SessionError};
use crate::sample::sample_dataset;

/// Environment variable overriding the session root directory.
pub const SESSION_DIR_ENV_VAR: &str = "CSVX_SESSION_DIR";

/// File name of the stored table inside a session directory (Arrow IPC).
pub const SAMPLE_FILE_NAME: &str = "sample_data.arrow";

/// Validated session identifier (`[A-Za-z0-9_-]+`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn parse(id: &str) -> Result<Self> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(SessionError::InvalidId { id: id.to_string() });
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage for a session's table.
pub trait SessionStore {
    /// Stores (or replaces) the session's table.
    fn put(&self, session: &SessionId, df: &DataFrame) -> Result<()>;

    /// Returns the stored table, if the session has one.
    fn get(&self, session: &SessionId) -> Result<Option<DataFrame>>;

    /// Removes the session's state. Returns false if there was none.
    fn clear(&self, session: &SessionId) -> Result<bool>;
}

/// Stores each session as `<root>/<id>/sample_data.arrow`.
///
/// Arrow IPC keeps dtypes and values exactly, so a stored table reads back
/// equal to what was put.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    root: PathBuf,
}

impl FileSessionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Uses `CSVX_SESSION_DIR`, falling back to the system temp directory.
    pub fn from_env() -> Self {
        match std::env::var(SESSION_DIR_ENV_VAR) {
            Ok(root) if !root.is_empty() => Self::new(root),
            _ => Self::new(std::env::temp_dir().join("csv-explorer-sessions")),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn session_dir(&self, session: &SessionId) -> PathBuf {
        self.root.join(session.as_str())
    }

    fn data_path(&self, session: &SessionId) -> PathBuf {
        self.session_dir(session).join(SAMPLE_FILE_NAME)
    }
}

impl SessionStore for FileSessionStore {
    fn put(&self, session: &SessionId, df: &DataFrame) -> Result<()> {
        let dir = self.session_dir(session);
        fs::create_dir_all(&dir).map_err(|e| SessionError::Io {
            operation: "create directory",
            path: dir.clone(),
            source: e,
        })?;

        // Write to a temp file first, then rename for atomicity
        let path = self.data_path(session);
        let temp_path = path.with_extension("arrow.tmp");
        if let Err(err) = write_ipc(&temp_path, df) {
            let _ = fs::remove_file(&temp_path);
            return Err(err);
        }

        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(SessionError::Io {
                operation: "rename",
                path: path.clone(),
                source: e,
            });
        }

        tracing::info!(session = %session, rows = df.height(), "Stored session data");
        Ok(())
    }

    fn get(&self, session: &SessionId) -> Result<Option<DataFrame>> {
        let path = self.data_path(session);
        if !path.is_file() {
            return Ok(None);
        }
        let file = File::open(&path).map_err(|e| SessionError::Io {
            operation: "open",
            path: path.clone(),
            source: e,
        })?;
        let df = IpcReader::new(file).finish()?;
        tracing::debug!(session = %session, rows = df.height(), "Read session data");
        Ok(Some(df))
    }

    fn clear(&self, session: &SessionId) -> Result<bool> {
        let dir = self.session_dir(session);
        if !dir.exists() {
            return Ok(false);
        }
        fs::remove_dir_all(&dir).map_err(|e| SessionError::Io {
            operation: "remove",
            path: dir.clone(),
            source: e,
        })?;
        tracing::info!(session = %session, "Cleared session");
        Ok(true)
    }
}

/// Returns the session's sample table, generating and storing it on first use.
///
/// The flag is true when the table was created by this call.
pub fn load_or_create_sample<S, R>(
    store: &S,
    session: &SessionId,
    rng: &mut R,
) -> Result<(DataFrame, bool)>
where
    S: SessionStore + ?Sized,
    R: Rng,
{
    if let Some(df) = store.get(session)? {
        return Ok((df, false));
    }
    let df = sample_dataset(rng)?;
    store.put(session, &df)?;
    Ok((df, true))
}

fn write_ipc(path: &Path, df: &DataFrame) -> Result<()> {
    let mut file = File::create(path).map_err(|e| SessionError::Io {
        operation: "create",
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut df = df.clone();
    IpcWriter::new(&mut file).finish(&mut df)?;
    file.sync_all().map_err(|e| SessionError::Io {
        operation: "flush",
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}
