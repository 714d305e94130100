use axum::{response::IntoResponse, Json};
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

use crate::utils::{
    scheduling::{
        constraints::{DayHours, SchedulingConstraints, WeekSchedule},
        models::BookingRequest,
    },
    time::parse_civil_time,
};

#[derive(Debug, Error)]
pub enum ValidateContentError {
    #[error("Data rejected with validation")]
    Expected(String),
    #[error("Unexpected server error")]
    Unexpected(#[from] anyhow::Error),
}

impl ValidateContentError {
    pub fn new(content: impl ToString) -> Self {
        Self::Expected(content.to_string())
    }
}

impl From<&ValidateContentError> for StatusCode {
    fn from(value: &ValidateContentError) -> Self {
        match value {
            ValidateContentError::Expected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ValidateContentError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ValidateContentError {
    fn into_response(self) -> axum::response::Response {
        let status_code = StatusCode::from(&self);
        let info = match self {
            ValidateContentError::Expected(content) => content,
            ValidateContentError::Unexpected(e) => {
                tracing::error!("Internal server error: {e:?}");
                "Unexpected server error".to_string()
            }
        };

        (status_code, Json(json!({ "error_info": info }))).into_response()
    }
}

pub trait ValidateContent {
    fn validate_content(&self) -> Result<(), ValidateContentError>;
}

impl ValidateContent for BookingRequest {
    fn validate_content(&self) -> Result<(), ValidateContentError> {
        if self.ends_at <= self.starts_at {
            return Err(ValidateContentError::new(
                "Booking ends sooner than it starts",
            ));
        }
        let span = (self.ends_at - self.starts_at).whole_minutes();
        if span != self.duration as i64 {
            return Err(ValidateContentError::new(
                "Declared duration does not match the booking time range",
            ));
        }
        Ok(())
    }
}

impl ValidateContent for SchedulingConstraints {
    fn validate_content(&self) -> Result<(), ValidateContentError> {
        let opens = parse_civil_time(&self.earliest_start_time)
            .map_err(|_| ValidateContentError::new("Unparsable earliest_start_time"))?;
        let closes = parse_civil_time(&self.latest_end_time)
            .map_err(|_| ValidateContentError::new("Unparsable latest_end_time"))?;
        if opens >= closes {
            return Err(ValidateContentError::new(
                "earliest_start_time must be before latest_end_time",
            ));
        }
        if self.min_lesson_duration > self.max_lesson_duration {
            return Err(ValidateContentError::new(
                "min_lesson_duration is above max_lesson_duration",
            ));
        }
        if self.min_buffer_between_lessons > self.max_buffer_between_lessons {
            return Err(ValidateContentError::new(
                "min_buffer_between_lessons is above max_buffer_between_lessons",
            ));
        }
        if self.allowed_durations.is_empty() {
            return Err(ValidateContentError::new("No allowed lesson durations"));
        }
        if self.allowed_durations.iter().any(|duration| {
            *duration < self.min_lesson_duration || *duration > self.max_lesson_duration
        }) {
            return Err(ValidateContentError::new(
                "Allowed durations outside the lesson duration bounds",
            ));
        }
        Ok(())
    }
}

impl ValidateContent for DayHours {
    fn validate_content(&self) -> Result<(), ValidateContentError> {
        if !self.enabled {
            return Ok(());
        }
        let opens = parse_civil_time(&self.opens_at)
            .map_err(|_| ValidateContentError::new("Unparsable opens_at"))?;
        let closes = parse_civil_time(&self.closes_at)
            .map_err(|_| ValidateContentError::new("Unparsable closes_at"))?;
        if opens >= closes {
            return Err(ValidateContentError::new(
                "Working hours close before they open",
            ));
        }
        Ok(())
    }
}

impl ValidateContent for WeekSchedule {
    fn validate_content(&self) -> Result<(), ValidateContentError> {
        for day in [
            &self.monday,
            &self.tuesday,
            &self.wednesday,
            &self.thursday,
            &self.friday,
            &self.saturday,
            &self.sunday,
        ] {
            day.validate_content()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod validation_tests {
    use time::macros::datetime;
    use uuid::Uuid;

    use super::*;

    fn request() -> BookingRequest {
        BookingRequest {
            user_id: Uuid::from_u128(1),
            starts_at: datetime!(2025-11-20 10:00 +10),
            ends_at: datetime!(2025-11-20 11:00 +10),
            duration: 60,
            lesson_type: None,
        }
    }

    #[test]
    fn booking_request_validation_ok() {
        assert!(request().validate_content().is_ok())
    }

    #[test]
    fn booking_request_validation_err_inverted() {
        let mut data = request();
        data.ends_at = datetime!(2025-11-20 09:59 +10);
        assert!(data.validate_content().is_err())
    }

    #[test]
    fn booking_request_validation_err_duration_mismatch() {
        let mut data = request();
        data.duration = 90;
        assert!(data.validate_content().is_err())
    }

    #[test]
    fn default_constraints_validate() {
        assert!(SchedulingConstraints::default().validate_content().is_ok())
    }

    #[test]
    fn constraints_validation_err_window() {
        let mut data = SchedulingConstraints::default();
        data.earliest_start_time = "19:00".to_string();
        data.latest_end_time = "07:00".to_string();
        assert!(data.validate_content().is_err())
    }

    #[test]
    fn constraints_validation_err_unparsable_time() {
        let mut data = SchedulingConstraints::default();
        data.latest_end_time = "7pm".to_string();
        assert!(data.validate_content().is_err())
    }

    #[test]
    fn constraints_validation_err_duration_bounds() {
        let mut data = SchedulingConstraints::default();
        data.min_lesson_duration = 200;
        assert!(data.validate_content().is_err())
    }

    #[test]
    fn constraints_validation_err_allowed_durations() {
        let mut data = SchedulingConstraints::default();
        data.allowed_durations = vec![60, 240];
        assert!(data.validate_content().is_err())
    }

    #[test]
    fn default_schedule_validates() {
        assert!(WeekSchedule::default().validate_content().is_ok())
    }

    #[test]
    fn disabled_day_skips_hour_checks() {
        let data = DayHours {
            enabled: false,
            opens_at: "bogus".to_string(),
            closes_at: "".to_string(),
        };
        assert!(data.validate_content().is_ok())
    }

    #[test]
    fn enabled_day_needs_a_forward_window() {
        let data = DayHours::open("17:00", "09:00");
        assert!(data.validate_content().is_err())
    }
}
