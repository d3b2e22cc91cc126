//! Session log loading and trial grouping.
//!
//! This module contains:
//! - Typed records for the raw session log
//! - The CSV loader that validates, cleans, and counts dropped rows
//! - Grouping of samples into ordered trials

pub mod loader;
pub mod types;

// Re-export commonly used types
pub use loader::{group_trials, load_session, LoadedSession, SessionError, REQUIRED_COLUMNS};
pub use types::{SessionRecord, Trial, TrialKey};
