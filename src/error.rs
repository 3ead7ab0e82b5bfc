use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Failures at the assignment store boundary
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("assignment store lock poisoned")]
    Poisoned,
}

/// Failures while importing assignments from CSV
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot open assignments file: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
}

/// Errors surfaced by the HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("assignment {id} not found in week {week}")]
    NotFound { week: String, id: String },
    #[error("Error cleaning up assignments: {0}")]
    Cleanup(#[source] StoreError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Cleanup(_) | AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "detail": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleanup_failures_carry_the_cause() {
        let err = AppError::Cleanup(StoreError::Poisoned);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "Error cleaning up assignments: assignment store lock poisoned"
        );
    }

    #[test]
    fn validation_is_a_client_error() {
        let err = AppError::Validation("Role is required".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
