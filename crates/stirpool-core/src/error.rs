//! Error taxonomy.
//!
//! The pool's own operations are pure CPU work and cannot fail; the only
//! library-level error is driving an engine that has no active pool.

use thiserror::Error;

/// Errors surfaced by [`RandomEngine`](crate::RandomEngine) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Extraction or save-data was requested before `activate` (or after
    /// `deactivate`). Noise injection on an inactive engine is not an error —
    /// it is silently dropped, since producer callbacks may fire at any time.
    #[error("random pool is not active")]
    NotActive,
}
