use time::{Date, Duration};
use time_tz::Tz;

use crate::utils::time::{local_instant, parse_civil_time};

use super::{
    constraints::{SchedulingConstraints, WeekSchedule},
    errors::ScheduleError,
    models::{ExistingBooking, TimeRange, TimeSlot},
};

/// Free, buffer-compliant windows of `duration` minutes for one civil day.
///
/// Walks a cursor across the day's working hours and emits at most one
/// candidate slot per gap between bookings; the caller offers denser
/// alternatives by re-querying with an emitted slot treated as booked.
pub fn available_slots(
    constraints: &SchedulingConstraints,
    schedule: &WeekSchedule,
    tz: &'static Tz,
    date: Date,
    existing: &[ExistingBooking],
    duration: u32,
) -> Result<Vec<TimeSlot>, ScheduleError> {
    let hours = schedule.for_weekday(date.weekday());
    if !hours.enabled {
        return Ok(Vec::new());
    }

    let opens = parse_civil_time(&hours.opens_at).map_err(|_| {
        ScheduleError::InvalidConstraints(format!("unparsable opens_at `{}`", hours.opens_at))
    })?;
    let closes = parse_civil_time(&hours.closes_at).map_err(|_| {
        ScheduleError::InvalidConstraints(format!("unparsable closes_at `{}`", hours.closes_at))
    })?;
    let window = TimeRange::new(local_instant(date, opens, tz)?, local_instant(date, closes, tz)?);

    let lesson = Duration::minutes(duration as i64);
    let buffer = constraints.min_buffer();

    let mut booked: Vec<TimeRange> = existing
        .iter()
        .filter(|booking| booking.is_confirmed())
        .map(|booking| booking.time_range())
        .filter(|range| range.is_overlapping(&window))
        .collect();
    booked.sort_by_key(|range| range.start);

    let mut slots = Vec::new();
    let mut cursor = window.start;
    for range in &booked {
        if range.start - cursor >= lesson + buffer {
            slots.push(TimeSlot::from(TimeRange::new_relative(cursor, lesson)));
        }
        let next = range.end + buffer;
        if next > cursor {
            cursor = next;
        }
    }
    if window.end - cursor >= lesson {
        slots.push(TimeSlot::from(TimeRange::new_relative(cursor, lesson)));
    }

    Ok(slots)
}
