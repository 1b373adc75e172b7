//! Error types shared by the amortization engine, projector and loaders

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutlookError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OutlookError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        OutlookError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type OutlookResult<T> = Result<T, OutlookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = OutlookError::invalid("principal", "must be positive, got 0");
        assert_eq!(err.to_string(), "Invalid input: principal: must be positive, got 0");
    }
}
