use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")] Database(#[from] sea_orm::DbErr),

    #[error("Invalid {field}: {message}")]
    Validation {
        field: String,
        message: String,
    },

    #[error("{0} not found")] NotFound(String),

    /// The mutation would orphan dependent data and needs an explicit override.
    #[error("Conflict: {0}")] Conflict(String),

    /// Two evaluations for the same athlete ran without serialization.
    #[error("Concurrency violation: {0}")] ConcurrencyViolation(String),

    #[error("Configuration error: {0}")] Config(String),

    #[error("Internal error: {0}")] Internal(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub requires_confirmation: bool,
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Store failures are the only transient errors; everything else is final.
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::Database(_))
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        let (code, message, field, requires_confirmation) = match self {
            AppError::Database(e) => ("DATABASE_ERROR", e.to_string(), None, false),
            AppError::Validation { field, message } =>
                ("VALIDATION_ERROR", message.clone(), Some(field.clone()), false),
            AppError::NotFound(what) => ("NOT_FOUND", format!("{} not found", what), None, false),
            AppError::Conflict(msg) => ("CONFLICT", msg.clone(), None, true),
            AppError::ConcurrencyViolation(msg) =>
                ("CONCURRENCY_VIOLATION", msg.clone(), None, false),
            AppError::Config(msg) => ("CONFIG_ERROR", msg.clone(), None, false),
            AppError::Internal(msg) => ("INTERNAL_ERROR", msg.clone(), None, false),
        };

        ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
                requires_confirmation,
            },
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::NotFound(_) => axum::http::StatusCode::NOT_FOUND,
            AppError::Validation { .. } => axum::http::StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => axum::http::StatusCode::CONFLICT,
            _ => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let AppError::ConcurrencyViolation(msg) = &self {
            tracing::error!("Concurrency violation reached the API layer: {}", msg);
        }

        let response = self.to_error_response();
        (status, axum::Json(response)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
