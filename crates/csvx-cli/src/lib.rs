//! CLI library components for the CSV explorer.

pub mod inspect;
pub mod logging;
