use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Customer {0} not found")]
    CustomerNotFound(i64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Data quality error: {0}")]
    DataQuality(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable discriminator sent alongside the message
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::CustomerNotFound(_) => "customer_not_found",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::DataQuality(_) => "data_quality",
            AppError::Database(_) | AppError::Io(_) | AppError::Internal(_) => "internal",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::CustomerNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::DataQuality(_)
            | AppError::Database(_)
            | AppError::Io(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, kind = self.kind(), "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string(),
            "kind": self.kind(),
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_distinct_from_data_quality() {
        let not_found = AppError::CustomerNotFound(42);
        let bad_data = AppError::DataQuality("row 3: missing Cantidad".to_string());

        assert_eq!(not_found.kind(), "customer_not_found");
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(bad_data.kind(), "data_quality");
        assert_eq!(bad_data.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_customer_not_found_message() {
        let err = AppError::CustomerNotFound(1001);
        assert_eq!(err.to_string(), "Customer 1001 not found");
    }

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let response = AppError::InvalidInput("radius".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
