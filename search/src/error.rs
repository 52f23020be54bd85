//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Runtime terminations
//! (destinations reached, exhaustion, resource limits) are expressed via
//! [`crate::search::SearchOutcome`] and never as errors. Every variant is
//! returned before the session is touched.

use thiserror::Error;

/// Typed failure for pre-flight search validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The evaluation context was built for a different rule graph.
    #[error("context belongs to graph `{found}`, session was created for `{expected}`")]
    ContextMismatch { expected: String, found: String },

    /// The world enumerating actions is not the one the session was created for.
    #[error("world `{found}` cannot drive a session created for `{expected}`")]
    WorldMismatch { expected: String, found: String },

    /// Parameters disagree with the session they are resuming.
    #[error("parameters do not match the session: {detail}")]
    SessionMismatch { detail: String },

    /// Parameters are malformed (no starts, NaN or negative costs).
    #[error("invalid search parameters: {detail}")]
    InvalidParams { detail: String },
}
