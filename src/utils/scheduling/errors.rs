use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

use crate::utils::time::errors::TimeError;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error("Invalid scheduling constraints: {0}")]
    InvalidConstraints(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl IntoResponse for ScheduleError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ScheduleError::Time(e) => e.into_response(),
            // a broken constraints record is an operator error, not a
            // booking rejection
            ScheduleError::InvalidConstraints(info) => {
                tracing::error!("Scheduling constraints rejected: {info}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error_info": "Scheduling configuration error" })),
                )
                    .into_response()
            }
            ScheduleError::Unexpected(e) => {
                tracing::error!("Internal server error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error_info": "Unexpected server error" })),
                )
                    .into_response()
            }
        }
    }
}
