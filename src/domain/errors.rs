use thiserror::Error;

/// Shown when the service gives no usable detail of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to get recommendations";

/// A required form field is missing. Raised before any network activity.
///
/// Variants are declared in the order the form is checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select your education background")]
    MissingEducation,
    #[error("Please select your preferred sector")]
    MissingSector,
    #[error("Please select your preferred location")]
    MissingLocation,
    #[error("Please add at least one skill")]
    NoSkills,
}

/// The recommendation request was sent but did not produce results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Non-2xx status; carries the server's `error` text when it sent one.
    #[error("{0}")]
    Request(String),
    /// Transport failure or a body that was not JSON.
    #[error("{0}")]
    Network(String),
}

impl SubmitError {
    pub fn request(message: Option<String>) -> Self {
        match message {
            Some(message) if !message.is_empty() => SubmitError::Request(message),
            _ => SubmitError::Request(FALLBACK_ERROR_MESSAGE.to_string()),
        }
    }

    pub fn network() -> Self {
        SubmitError::Network(FALLBACK_ERROR_MESSAGE.to_string())
    }
}

/// Anything that stopped a submission, as returned by the form controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error("a submission is already in progress")]
    Busy,
}

pub type FormResult<T> = Result<T, FormError>;
