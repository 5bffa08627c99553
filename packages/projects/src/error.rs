use calculator_core::EvalError;
use calculator_storage::StorageError;
use thiserror::Error;

/// Service errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("project '{0}' does not exist")]
    ProjectNotFound(i64),
    #[error("Calculation '{0}' does not exist")]
    CalculationNotFound(i64),
    #[error("Calculation '{id}' could not be evaluated: {source}")]
    Evaluation {
        id: i64,
        #[source]
        source: EvalError,
    },
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages_name_the_id() {
        assert_eq!(
            ServiceError::ProjectNotFound(13).to_string(),
            "project '13' does not exist"
        );
        assert_eq!(
            ServiceError::CalculationNotFound(5).to_string(),
            "Calculation '5' does not exist"
        );
    }

    #[test]
    fn test_evaluation_message_includes_reason() {
        let error = ServiceError::Evaluation {
            id: 3,
            source: EvalError::DivisionByZero,
        };
        assert_eq!(
            error.to_string(),
            "Calculation '3' could not be evaluated: division by zero"
        );
    }
}
