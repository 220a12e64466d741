use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("{field} {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },
}

impl CalcError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field,
            message: message.into(),
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { field, .. } => field,
        }
    }
}

pub type CalcResult<T> = Result<T, CalcError>;
