use crate::form::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A registration was rejected; carries the per-field errors.
    #[error("Registration rejected: {} invalid field(s)", .0.len())]
    InvalidRegistration(FieldErrors),
}
