use crate::utils::scheduling::errors::ScheduleError;
use crate::utils::time::errors::TimeError;
use crate::validation::ValidateContentError;
use axum::response::IntoResponse;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ScheduleError(#[from] ScheduleError),
    #[error(transparent)]
    TimeError(#[from] TimeError),
    #[error(transparent)]
    ValidationError(#[from] ValidateContentError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::ScheduleError(e) => e.into_response(),
            AppError::TimeError(e) => e.into_response(),
            AppError::ValidationError(e) => e.into_response(),
        }
    }
}

pub trait DefaultContext<T> {
    fn dc(self) -> Result<T, anyhow::Error>;
}

impl<T, E> DefaultContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn dc(self) -> Result<T, anyhow::Error> {
        self.map_err(anyhow::Error::new)
    }
}

impl<T> DefaultContext<T> for Option<T> {
    fn dc(self) -> Result<T, anyhow::Error> {
        self.ok_or_else(|| anyhow::anyhow!("Unexpected missing value"))
    }
}
