use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimeError {
    #[error("Invalid date format, expected YYYY-MM-DD")]
    InvalidDateFormat,
    #[error("Invalid time format, expected HH:mm")]
    InvalidTimeFormat,
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
    #[error("Local time does not exist in the target timezone")]
    NonexistentLocalTime,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl IntoResponse for TimeError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match &self {
            TimeError::InvalidDateFormat
            | TimeError::InvalidTimeFormat
            | TimeError::NonexistentLocalTime => StatusCode::UNPROCESSABLE_ENTITY,
            TimeError::UnknownTimezone(_) => StatusCode::BAD_REQUEST,
            TimeError::Unexpected(e) => {
                tracing::error!("Internal server error: {e:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let info = match self {
            TimeError::Unexpected(_) => "Unexpected server error".to_string(),
            _ => self.to_string(),
        };

        (status_code, Json(json!({ "error_info": info }))).into_response()
    }
}
