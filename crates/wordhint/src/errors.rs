//! # Error Types
//!
//! ## Overview
//!
//! This module contains the error types returned when setting up a completion
//! session. The engine itself has no recoverable runtime errors: missing
//! matches, empty prefixes, and removals of absent words are all normal,
//! silent outcomes.

/// Errors returned when configuring a completion session.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum SessionError {
    /// Failure due to a mode with no registered keyword list.
    #[error("No keyword list registered for mode {0:?}")]
    UnknownMode(String),
}

/// Wrapper for [Result] with a [SessionError].
pub type SessionResult<T> = Result<T, SessionError>;
