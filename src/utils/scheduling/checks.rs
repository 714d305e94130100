use time::{Duration, OffsetDateTime, Weekday};
use time_tz::{OffsetDateTimeExt, Tz};

use crate::utils::time::{
    do_time_slots_overlap, is_date_in_past, local_date, minute_of_day, minutes_to_time,
    LocalTimeStart,
};

use super::{
    constraints::SchedulingConstraints,
    errors::ScheduleError,
    models::{BookingRequest, ExistingBooking, TimeRange, ValidationResult},
};

/// Shared input of one validation run; the checks never mutate it.
pub struct CheckContext<'a> {
    pub constraints: &'a SchedulingConstraints,
    pub tz: &'static Tz,
    pub request: &'a BookingRequest,
    pub existing: &'a [ExistingBooking],
    pub now: OffsetDateTime,
}

impl CheckContext<'_> {
    fn confirmed(&self) -> impl Iterator<Item = &ExistingBooking> {
        self.existing.iter().filter(|booking| booking.is_confirmed())
    }
}

pub fn check_time_window(
    ctx: &CheckContext,
    out: &mut ValidationResult,
) -> Result<(), ScheduleError> {
    let (opens, closes) = ctx.constraints.booking_window()?;
    let starts = minute_of_day(ctx.request.starts_at, ctx.tz);
    let ends = minute_of_day(ctx.request.ends_at, ctx.tz);

    if starts < opens {
        out.error(format!(
            "Lessons cannot start before {}",
            minutes_to_time(opens)
        ));
    } else if starts > closes {
        out.error(format!(
            "Lessons cannot start after {}",
            minutes_to_time(closes)
        ));
    }
    if ends > closes {
        out.error(format!(
            "Lessons cannot end after {}",
            minutes_to_time(closes)
        ));
    } else if ends < opens {
        out.error(format!(
            "Lessons cannot end before {}",
            minutes_to_time(opens)
        ));
    }

    let weekday = ctx.request.starts_at.to_timezone(ctx.tz).weekday();
    if matches!(weekday, Weekday::Saturday | Weekday::Sunday) {
        out.warn("Weekend lessons depend on instructor availability");
    }

    Ok(())
}

pub fn check_duration(ctx: &CheckContext, out: &mut ValidationResult) {
    let constraints = ctx.constraints;
    let duration = ctx.request.duration;

    if duration < constraints.min_lesson_duration || duration > constraints.max_lesson_duration {
        out.error(format!(
            "Lesson duration must be between {} and {} minutes",
            constraints.min_lesson_duration, constraints.max_lesson_duration
        ));
    }
    if !constraints.allowed_durations.contains(&duration) {
        out.warn(format!("{duration} minutes is not a standard lesson duration"));
        let allowed = constraints
            .allowed_durations
            .iter()
            .map(|minutes| minutes.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        out.suggest(format!("Standard lesson durations are {allowed} minutes"));
    }
}

pub fn check_advance_notice(ctx: &CheckContext, out: &mut ValidationResult) {
    let constraints = ctx.constraints;

    if is_date_in_past(ctx.request.starts_at, ctx.now, ctx.tz) {
        out.error("Lessons cannot be booked in the past");
    }

    let lead = ctx.request.starts_at - ctx.now;
    if lead < Duration::hours(constraints.min_advance_booking_hours as i64) {
        out.error(format!(
            "Bookings require at least {} hours notice",
            constraints.min_advance_booking_hours
        ));
    }
    if lead > Duration::days(constraints.max_advance_booking_days as i64) {
        out.error(format!(
            "Bookings cannot be made more than {} days in advance",
            constraints.max_advance_booking_days
        ));
    }
}

pub fn check_weekly_limits(
    ctx: &CheckContext,
    out: &mut ValidationResult,
) -> Result<(), ScheduleError> {
    let week_start = ctx.request.starts_at.week_start_in(ctx.tz)?;
    let mut booked_minutes = 0i64;
    let mut booked_lessons = 0u32;

    for booking in ctx.confirmed() {
        if booking.user_id != ctx.request.user_id {
            continue;
        }
        if booking.starts_at.week_start_in(ctx.tz)? != week_start {
            continue;
        }
        booked_minutes += booking.time_range().duration().whole_minutes();
        booked_lessons += 1;
    }

    let constraints = ctx.constraints;
    if booked_minutes + ctx.request.duration as i64 > constraints.max_hours_per_week as i64 * 60 {
        out.error(format!(
            "Weekly limit exceeded: maximum {} hours per week",
            constraints.max_hours_per_week
        ));
    }
    if booked_lessons + 1 > constraints.max_lessons_per_week {
        out.error(format!(
            "Weekly limit exceeded: maximum {} lessons per week",
            constraints.max_lessons_per_week
        ));
    }

    Ok(())
}

pub fn check_daily_limits(ctx: &CheckContext, out: &mut ValidationResult) {
    let day = local_date(ctx.request.starts_at, ctx.tz);
    let mut user_minutes = 0i64;
    let mut user_lessons = 0u32;
    let mut day_minutes = 0i64;

    for booking in ctx.confirmed() {
        if local_date(booking.starts_at, ctx.tz) != day {
            continue;
        }
        let minutes = booking.time_range().duration().whole_minutes();
        day_minutes += minutes;
        if booking.user_id == ctx.request.user_id {
            user_minutes += minutes;
            user_lessons += 1;
        }
    }

    let constraints = ctx.constraints;
    let requested = ctx.request.duration as i64;
    if user_minutes + requested > constraints.max_hours_per_day as i64 * 60 {
        out.error(format!(
            "Daily limit exceeded: maximum {} hours per day",
            constraints.max_hours_per_day
        ));
    }
    if user_lessons + 1 > constraints.max_lessons_per_day {
        out.error(format!(
            "Daily limit exceeded: maximum {} lessons per day",
            constraints.max_lessons_per_day
        ));
    }
    // the snapshot covers one instructor, so the whole day's confirmed load
    // doubles as the instructor's load
    if day_minutes + requested > constraints.max_instructor_hours_per_day as i64 * 60 {
        out.error(format!(
            "Instructor limit exceeded: maximum {} bookable hours per day",
            constraints.max_instructor_hours_per_day
        ));
    }
}

pub fn check_buffer(ctx: &CheckContext, out: &mut ValidationResult) {
    let constraints = ctx.constraints;
    let buffer_minutes = constraints.min_buffer_between_lessons as i64;
    let request = ctx.request.time_range();

    for booking in ctx.confirmed() {
        if !do_time_slots_overlap(
            request.start,
            request.end,
            booking.starts_at,
            booking.ends_at,
            buffer_minutes,
        ) {
            continue;
        }
        if request.is_overlapping(&booking.time_range()) {
            out.error("Requested time overlaps an existing booking");
            continue;
        }
        let gap = if request.is_after(&booking.time_range()) {
            request.start - booking.ends_at
        } else {
            booking.starts_at - request.end
        };
        // exact back-to-back lessons are allowed, the consecutive-lesson
        // rule covers them
        if gap > Duration::ZERO && gap < constraints.min_buffer() {
            out.error(format!(
                "Lessons require at least {} minutes between them",
                constraints.min_buffer_between_lessons
            ));
        }
    }
}

pub fn check_consecutive(ctx: &CheckContext, out: &mut ValidationResult) {
    let constraints = ctx.constraints;
    let day = local_date(ctx.request.starts_at, ctx.tz);

    let mut ranges: Vec<TimeRange> = ctx
        .confirmed()
        .filter(|booking| local_date(booking.starts_at, ctx.tz) == day)
        .map(|booking| booking.time_range())
        .collect();
    ranges.push(ctx.request.time_range());
    ranges.sort_by_key(|range| range.start);

    let buffer = constraints.min_buffer();
    let min_break = Duration::minutes(constraints.min_break_duration as i64);
    let teaching_limit = Duration::hours(constraints.required_break_after_hours as i64);

    let mut run_length = 1u32;
    let mut longest_run = 1u32;
    let mut run_teaching = ranges[0].duration();
    let mut short_break_flagged = false;

    for pair in ranges.windows(2) {
        let gap = pair[1].start - pair[0].end;
        if gap <= buffer {
            run_length += 1;
            run_teaching += pair[1].duration();
            longest_run = longest_run.max(run_length);
        } else {
            if run_teaching >= teaching_limit && gap < min_break && !short_break_flagged {
                out.warn(format!(
                    "After {} hours of back-to-back lessons a break of at least {} minutes is recommended",
                    constraints.required_break_after_hours, constraints.min_break_duration
                ));
                short_break_flagged = true;
            }
            run_length = 1;
            run_teaching = pair[1].duration();
        }
    }

    if longest_run > constraints.max_consecutive_lessons {
        out.warn(format!(
            "More than {} lessons in a row without a proper break",
            constraints.max_consecutive_lessons
        ));
    }
}
