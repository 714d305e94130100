pub mod models;

use axum::{extract::State, routing::post, Json, Router};
use time::OffsetDateTime;
use tracing::debug;
use validator::Validate;

use crate::app_errors::AppError;
use crate::modules::{AppState, SchedulerState};
use crate::utils::scheduling;
use crate::utils::scheduling::models::ValidationResult;
use crate::utils::time::parse_civil_date;
use crate::validation::{ValidateContent, ValidateContentError};

use self::models::{AvailableSlots, SlotsPayload, ValidateBookingPayload};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/validate", post(validate_booking))
        .route("/slots", post(available_slots))
}

/// Validate a booking request
#[utoipa::path(post, path = "/bookings/validate", tag = "bookings", request_body = ValidateBookingPayload, responses((status = 200, body = ValidationResult, description = "Aggregated verdict; rule violations are data, not errors")))]
pub async fn validate_booking(
    State(scheduler): State<SchedulerState>,
    Json(body): Json<ValidateBookingPayload>,
) -> Result<Json<ValidationResult>, AppError> {
    body.request.validate_content()?;

    let constraints = scheduler.constraints();
    let result = scheduling::validate_booking(
        &constraints,
        scheduler.timezone(),
        &body.request,
        &body.existing_bookings,
        OffsetDateTime::now_utc(),
    )?;
    debug!(
        "Booking request for {} is {}",
        body.request.user_id,
        if result.is_valid { "valid" } else { "invalid" }
    );

    Ok(Json(result))
}

/// List bookable slots for a day
#[utoipa::path(post, path = "/bookings/slots", tag = "bookings", request_body = SlotsPayload, responses((status = 200, body = AvailableSlots, description = "Free, buffer-compliant slots")))]
pub async fn available_slots(
    State(scheduler): State<SchedulerState>,
    Json(body): Json<SlotsPayload>,
) -> Result<Json<AvailableSlots>, AppError> {
    body.validate().map_err(ValidateContentError::new)?;
    let date = parse_civil_date(&body.date)?;

    let constraints = scheduler.constraints();
    let slots = scheduling::available_slots(
        &constraints,
        scheduler.week_schedule(),
        scheduler.timezone(),
        date,
        &body.existing_bookings,
        body.duration,
    )?;
    debug!("{} slots available on {}", slots.len(), body.date);

    Ok(Json(AvailableSlots {
        date: body.date,
        duration: body.duration,
        slots,
    }))
}
