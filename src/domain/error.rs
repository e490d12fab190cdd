use thiserror::Error;

/// Station construction errors
///
/// Only raised when building a station through [`PowerStation::try_new`].
/// Runtime updates accept any input and never fail.
///
/// [`PowerStation::try_new`]: crate::domain::PowerStation::try_new
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StationError {
    #[error("Invalid argument: {field} must be finite and positive (got {value})")]
    InvalidArgument { field: &'static str, value: f64 },
}

impl StationError {
    pub(crate) fn check_rating(field: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(StationError::InvalidArgument { field, value })
        }
    }
}
