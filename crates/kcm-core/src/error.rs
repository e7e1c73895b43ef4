//! Engine-wide base error type.
//!
//! Runtime failures in this engine are locally recovered (sentinel indices,
//! fallback axes, NaN guards) and never surfaced to the caller.  `KcmError`
//! exists for *construction-time* problems only, such as the fallible
//! by-name registry lookups.  Sub-crates define their own error enums for
//! their own validation (e.g. the pipeline builder) and may convert into
//! or wrap this one.

use thiserror::Error;

/// The top-level error type for `kcm-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum KcmError {
    #[error("behavior '{0}' not found in registry")]
    BehaviorNotFound(String),
}

/// Shorthand result type for all `kcm-*` crates.
pub type KcmResult<T> = Result<T, KcmError>;
