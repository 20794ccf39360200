use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by particle construction, stepping and configuration.
///
/// Every fallible operation validates before it mutates, so an `Err` never
/// leaves a world or particle half-updated.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid caller-supplied parameter (mass, radius, dt, bounds, handle).
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Malformed world configuration document.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}
