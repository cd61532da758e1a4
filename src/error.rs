//! Errors raised while setting up a simulation run.
//!
//! The engine is plain arithmetic, so any error is a problem with the inputs and is reported before
//! the first month is simulated.
use thiserror::Error;

/// An error in the inputs to a simulation run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A baseline statistic is missing or unusable (e.g. a zero denominator)
    #[error("Invalid baseline data: {0}")]
    DataError(String),
    /// An intervention or reporting parameter is out of range
    #[error("Invalid parameter: {0}")]
    ParameterError(String),
}

/// Result type for engine operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Return early with a [`ModelError::DataError`] if the condition doesn't hold
macro_rules! ensure_data {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::error::ModelError::DataError(format!($($arg)+)));
        }
    };
}
pub(crate) use ensure_data;

/// Return early with a [`ModelError::ParameterError`] if the condition doesn't hold
macro_rules! ensure_parameter {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::error::ModelError::ParameterError(format!($($arg)+)));
        }
    };
}
pub(crate) use ensure_parameter;
