//! Engine-wide error type.
//!
//! Mirrors the taxonomy of the original `ST_RETCODE` values: `BadArguments`,
//! `InvalidState`, `InExecution`, `XmlError`, `Plan`, `Dead`.
//! `BufferTooSmall` has no Rust analogue (there are no caller-allocated
//! output buffers in this API) and is dropped.

use crate::genome::{GenomeReason, GenomeState, GenomeTermination};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("bad argument: {0}")]
    BadArguments(String),

    #[error("illegal call in state {found:?} (expected {expected:?})")]
    InvalidState {
        expected: GenomeState,
        found: GenomeState,
    },

    #[error("illegal nested call while a plan is executing")]
    InExecution,

    #[error("xml error: {0}")]
    XmlError(String),

    #[error("plan terminated: {termination:?}/{reason:?}: {message}")]
    Plan {
        termination: GenomeTermination,
        reason: GenomeReason,
        message: String,
    },

    #[error("genome is dead: {0}")]
    Dead(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
