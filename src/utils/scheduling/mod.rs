use time::OffsetDateTime;
use time_tz::Tz;

use self::checks::CheckContext;
use self::constraints::SchedulingConstraints;
use self::errors::ScheduleError;
use self::models::{BookingRequest, ExistingBooking, ValidationResult};

pub mod checks;
pub mod constraints;
pub mod errors;
pub mod models;
pub mod slots;

pub use slots::available_slots;

/// Decides whether `request` may be accepted given one constraints snapshot
/// and the caller-supplied booking history. Pure over its inputs: the clock
/// is an argument and nothing is mutated.
///
/// Every check runs, so the caller sees all findings at once; only a broken
/// constraints record aborts early.
pub fn validate_booking(
    constraints: &SchedulingConstraints,
    tz: &'static Tz,
    request: &BookingRequest,
    existing: &[ExistingBooking],
    now: OffsetDateTime,
) -> Result<ValidationResult, ScheduleError> {
    let ctx = CheckContext {
        constraints,
        tz,
        request,
        existing,
        now,
    };
    let mut result = ValidationResult::new();

    checks::check_time_window(&ctx, &mut result)?;
    checks::check_duration(&ctx, &mut result);
    checks::check_advance_notice(&ctx, &mut result);
    checks::check_weekly_limits(&ctx, &mut result)?;
    checks::check_daily_limits(&ctx, &mut result);
    checks::check_buffer(&ctx, &mut result);
    checks::check_consecutive(&ctx, &mut result);

    Ok(result)
}
