use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceError {
    #[error("invalid date spec {input:?}: {reason}")]
    InvalidDateSpec { input: String, reason: String },
}

impl RecurrenceError {
    pub(crate) fn invalid<I: Into<String>, R: Into<String>>(input: I, reason: R) -> Self {
        Self::InvalidDateSpec {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
