use thiserror::Error;

/// Why an action was refused
///
/// Every variant renders as the notice shown to the editor. A refused
/// action never modifies the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Unrecognised action")]
    UnrecognisedAction,

    /// A mandatory field was empty after trimming; carries the full notice
    #[error("{0}")]
    Required(&'static str),

    #[error("Invalid {0} index")]
    InvalidIndex(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Provide at least one field for the step")]
    EmptyStep,
}

pub type ValidationResult<T> = Result<T, ValidationError>;
