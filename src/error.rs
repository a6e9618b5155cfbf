//! Error types.
//!
//! Only precondition violations and loader failures surface as errors.
//! Structural repair failures inside mutation operators are recovered
//! locally and never reach the caller.

use thiserror::Error;

/// A configuration value was rejected before any work started.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("population_size must be at least 2, got {0}")]
    PopulationTooSmall(usize),

    #[error("generation_limit must be at least 1")]
    ZeroGenerationLimit,

    #[error("{name} must be a probability in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("{name} must be a finite, non-negative weight, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("{name} must be a percentage in [0, 100], got {value}")]
    InvalidPercentage { name: &'static str, value: u32 },

    #[error("max_shift must be at least 1")]
    ZeroMaxShift,

    #[error("max_length must be at least 1")]
    ZeroMaxLength,

    #[error("tournament percentage must lie in (0, 1], got {0}")]
    InvalidTournamentPercentage(f64),

    #[error("roulette bias must be finite and greater than 1, got {0}")]
    InvalidRouletteBias(f64),

    #[error("dynamic evaluator buffer size must be at least 1")]
    ZeroBufferSize,
}

/// Failure to build or load a [`Problem`](crate::model::Problem).
#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("failed to read problem file: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing board header line `width;height`")]
    MissingHeader,

    #[error("malformed board header `{0}`")]
    MalformedHeader(String),

    #[error("line {line}: expected `x1;y1;x2;y2`, got `{content}`")]
    MalformedPair { line: usize, content: String },

    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidBoard { width: i32, height: i32 },

    #[error("problem has no pin pairs to connect")]
    NoPairs,
}

/// Failure while exporting generation history.
#[cfg(feature = "serde")]
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("history I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("history serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("history writer thread terminated unexpectedly")]
    WriterPanicked,
}
