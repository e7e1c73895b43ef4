//! Pipeline construction errors.
//!
//! Only *configuration* mistakes surface as errors, and only at build time.
//! Everything at tick time (missing behaviors, degenerate geometry, NaN) is
//! locally recovered — the worst visible symptom is an agent holding still
//! for one tick, never an abort.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid pipeline configuration: {0}")]
    Config(String),

    #[error("behavior `{0}` is already registered")]
    DuplicateBehavior(String),

    #[error("slide depth must be at least 1, got {0}")]
    InvalidSlideDepth(u32),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
