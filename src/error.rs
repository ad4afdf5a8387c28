use thiserror::Error;

/// Top-level error type for the roofline engine.
#[derive(Debug, Error)]
pub enum RooflineError {
    #[error(transparent)]
    Pitch(#[from] PitchError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised by pitch calculations.
#[derive(Debug, Error)]
pub enum PitchError {
    #[error("run cannot be zero")]
    ZeroRun,

    #[error("{parameter} must be finite, got {value}")]
    NonFinite { parameter: &'static str, value: f64 },

    #[error("degenerate roof outline: {0}")]
    DegenerateOutline(String),

    #[error("invalid pitch ratio: {0}")]
    InvalidRatio(String),
}

/// Errors raised when validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("minimum overhang {min} exceeds maximum overhang {max}")]
    OverhangRange { min: f64, max: f64 },
}

/// Convenience type alias for results using [`RooflineError`].
pub type Result<T> = std::result::Result<T, RooflineError>;
