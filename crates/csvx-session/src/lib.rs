//! Session state for the CSV explorer.
//!
//! The sample dataset survives between requests by living in
//! process-external storage keyed by session id, not in global state.

mod error;
mod sample;
mod store;

pub use error::{Result, SessionError};
pub use sample::{SAMPLE_ROWS, sample_dataset};
pub use store::{
    FileSessionStore, SAMPLE_FILE_NAME, SESSION_DIR_ENV_VAR, SessionId, SessionStore,
    load_or_create_sample,
};
