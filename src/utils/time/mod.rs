use time::{Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time};
use time_tz::{timezones, OffsetDateTimeExt, OffsetResult, PrimitiveDateTimeExt, Tz};

use crate::app_errors::DefaultContext;

use self::errors::TimeError;

pub mod errors;

pub fn resolve_timezone(name: &str) -> Result<&'static Tz, TimeError> {
    timezones::get_by_name(name).ok_or_else(|| TimeError::UnknownTimezone(name.to_string()))
}

fn parse_padded(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

pub fn parse_civil_date(date: &str) -> Result<Date, TimeError> {
    let bytes = date.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(TimeError::InvalidDateFormat);
    }
    let year = parse_padded(&date[0..4]).ok_or(TimeError::InvalidDateFormat)?;
    let month = parse_padded(&date[5..7]).ok_or(TimeError::InvalidDateFormat)?;
    let day = parse_padded(&date[8..10]).ok_or(TimeError::InvalidDateFormat)?;

    let month =
        Month::try_from(u8::try_from(month).map_err(|_| TimeError::InvalidDateFormat)?)
            .map_err(|_| TimeError::InvalidDateFormat)?;
    Date::from_calendar_date(year as i32, month, day as u8)
        .map_err(|_| TimeError::InvalidDateFormat)
}

pub fn parse_civil_time(time: &str) -> Result<Time, TimeError> {
    let bytes = time.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(TimeError::InvalidTimeFormat);
    }
    let hours = parse_padded(&time[0..2]).ok_or(TimeError::InvalidTimeFormat)?;
    let minutes = parse_padded(&time[3..5]).ok_or(TimeError::InvalidTimeFormat)?;

    Time::from_hms(hours as u8, minutes as u8, 0).map_err(|_| TimeError::InvalidTimeFormat)
}

/// Interprets a civil date and time of day in the given zone. An ambiguous
/// local time (DST fold) resolves to the earlier instant; a nonexistent one
/// (DST gap) is an input error.
pub fn local_instant(date: Date, time: Time, tz: &Tz) -> Result<OffsetDateTime, TimeError> {
    match PrimitiveDateTime::new(date, time).assume_timezone(tz) {
        OffsetResult::Some(instant) => Ok(instant),
        OffsetResult::Ambiguous(earlier, _) => Ok(earlier),
        OffsetResult::None => Err(TimeError::NonexistentLocalTime),
    }
}

pub fn create_date_in_timezone(date: &str, tz: &Tz) -> Result<OffsetDateTime, TimeError> {
    local_instant(parse_civil_date(date)?, Time::MIDNIGHT, tz)
}

pub fn create_date_time_in_timezone(
    date: &str,
    time: &str,
    tz: &Tz,
) -> Result<OffsetDateTime, TimeError> {
    local_instant(parse_civil_date(date)?, parse_civil_time(time)?, tz)
}

pub fn format_date_in_timezone(instant: OffsetDateTime, tz: &Tz) -> String {
    let local = instant.to_timezone(tz);
    format!(
        "{:04}-{:02}-{:02}",
        local.year(),
        u8::from(local.month()),
        local.day()
    )
}

pub fn format_time_in_timezone(instant: OffsetDateTime, tz: &Tz) -> String {
    let local = instant.to_timezone(tz);
    format!("{:02}:{:02}", local.hour(), local.minute())
}

pub fn local_date(instant: OffsetDateTime, tz: &Tz) -> Date {
    instant.to_timezone(tz).date()
}

pub fn minute_of_day(instant: OffsetDateTime, tz: &Tz) -> u16 {
    let local = instant.to_timezone(tz);
    local.hour() as u16 * 60 + local.minute() as u16
}

pub fn time_to_minutes(time: &str) -> Result<u16, TimeError> {
    let time = parse_civil_time(time)?;
    Ok(time.hour() as u16 * 60 + time.minute() as u16)
}

pub fn minutes_to_time(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Half-open intersection of `[s1, e1)` with `[s2, e2)` after widening the
/// second interval by `buffer_minutes` on both sides.
pub fn do_time_slots_overlap(
    s1: OffsetDateTime,
    e1: OffsetDateTime,
    s2: OffsetDateTime,
    e2: OffsetDateTime,
    buffer_minutes: i64,
) -> bool {
    let buffer = Duration::minutes(buffer_minutes);
    s1 < e2 + buffer && e1 > s2 - buffer
}

/// Compares civil days in the zone, so "today" is never in the past.
pub fn is_date_in_past(instant: OffsetDateTime, now: OffsetDateTime, tz: &Tz) -> bool {
    local_date(instant, tz) < local_date(now, tz)
}

pub trait LocalTimeStart {
    fn day_start_in(self, tz: &Tz) -> Result<OffsetDateTime, TimeError>;
    fn week_start_in(self, tz: &Tz) -> Result<OffsetDateTime, TimeError>;
}

impl LocalTimeStart for OffsetDateTime {
    fn day_start_in(self, tz: &Tz) -> Result<OffsetDateTime, TimeError> {
        local_instant(local_date(self, tz), Time::MIDNIGHT, tz)
    }

    fn week_start_in(self, tz: &Tz) -> Result<OffsetDateTime, TimeError> {
        let local = self.to_timezone(tz);
        let days_into_week = local.weekday().number_days_from_monday();
        let monday = local
            .date()
            .checked_sub(Duration::days(days_into_week as i64))
            .dc()?;
        local_instant(monday, Time::MIDNIGHT, tz)
    }
}

#[cfg(test)]
mod time_tests {
    use time::macros::datetime;

    use super::*;

    fn brisbane() -> &'static Tz {
        resolve_timezone("Australia/Brisbane").unwrap()
    }

    fn sydney() -> &'static Tz {
        resolve_timezone("Australia/Sydney").unwrap()
    }

    #[test]
    fn civil_round_trip_is_stable() {
        for zone in ["Australia/Brisbane", "Australia/Sydney", "Europe/Warsaw"] {
            let tz = resolve_timezone(zone).unwrap();
            for (date, time) in [
                ("2025-11-20", "10:00"),
                ("2025-01-05", "06:45"),
                ("2024-02-29", "23:30"),
                ("2025-10-06", "09:00"),
            ] {
                let mut instant = create_date_time_in_timezone(date, time, tz).unwrap();
                for _ in 0..5 {
                    assert_eq!(format_date_in_timezone(instant, tz), date);
                    assert_eq!(format_time_in_timezone(instant, tz), time);
                    instant = create_date_time_in_timezone(
                        &format_date_in_timezone(instant, tz),
                        &format_time_in_timezone(instant, tz),
                        tz,
                    )
                    .unwrap();
                }
            }
        }
    }

    #[test]
    fn midnight_constructor_matches_explicit_time() {
        assert_eq!(
            create_date_in_timezone("2025-11-20", brisbane()).unwrap(),
            create_date_time_in_timezone("2025-11-20", "00:00", brisbane()).unwrap()
        );
    }

    #[test]
    fn dst_gap_is_rejected() {
        // Sydney skips 02:00-03:00 on 2025-10-05
        assert!(matches!(
            create_date_time_in_timezone("2025-10-05", "02:30", sydney()),
            Err(TimeError::NonexistentLocalTime)
        ));
    }

    #[test]
    fn dst_fold_resolves_to_earlier_offset() {
        // Sydney repeats 02:00-03:00 on 2025-04-06
        let instant = create_date_time_in_timezone("2025-04-06", "02:30", sydney()).unwrap();
        assert_eq!(format_time_in_timezone(instant, sydney()), "02:30");
        assert_eq!(instant.to_timezone(sydney()).offset().whole_hours(), 11);
    }

    #[test]
    fn malformed_dates_are_rejected() {
        for date in [
            "2025-13-01",
            "2025-00-10",
            "2025-02-30",
            "2025-1-01",
            "01-01-2025",
            "2025/01/01",
            "2025-01-0a",
            "20250101",
        ] {
            assert!(
                matches!(
                    create_date_in_timezone(date, brisbane()),
                    Err(TimeError::InvalidDateFormat)
                ),
                "{date} should be rejected"
            );
        }
    }

    #[test]
    fn malformed_times_are_rejected() {
        for time in ["7:00", "24:00", "10:60", "10:5", "10.30", "1000", ""] {
            assert!(
                matches!(
                    create_date_time_in_timezone("2025-11-20", time, brisbane()),
                    Err(TimeError::InvalidTimeFormat)
                ),
                "{time} should be rejected"
            );
        }
    }

    #[test]
    fn minutes_codec_is_inverse() {
        for minutes in [0u16, 1, 59, 60, 450, 719, 720, 1439] {
            assert_eq!(time_to_minutes(&minutes_to_time(minutes)).unwrap(), minutes);
        }
        assert_eq!(time_to_minutes("07:30").unwrap(), 450);
        assert_eq!(minutes_to_time(1140), "19:00");
    }

    #[test]
    fn overlap_is_symmetric() {
        let pairs = [
            (
                datetime!(2025-11-20 10:00 +10),
                datetime!(2025-11-20 11:00 +10),
                datetime!(2025-11-20 11:05 +10),
                datetime!(2025-11-20 12:05 +10),
            ),
            (
                datetime!(2025-11-20 10:00 +10),
                datetime!(2025-11-20 11:00 +10),
                datetime!(2025-11-20 10:30 +10),
                datetime!(2025-11-20 10:45 +10),
            ),
            (
                datetime!(2025-11-20 10:00 +10),
                datetime!(2025-11-20 11:00 +10),
                datetime!(2025-11-20 14:00 +10),
                datetime!(2025-11-20 15:00 +10),
            ),
        ];
        for (s1, e1, s2, e2) in pairs {
            for buffer in [0, 15, 30] {
                assert_eq!(
                    do_time_slots_overlap(s1, e1, s2, e2, buffer),
                    do_time_slots_overlap(s2, e2, s1, e1, buffer)
                );
            }
        }
    }

    #[test]
    fn buffer_widens_the_conflict_window() {
        let s1 = datetime!(2025-11-20 10:00 +10);
        let e1 = datetime!(2025-11-20 11:00 +10);
        let s2 = datetime!(2025-11-20 11:05 +10);
        let e2 = datetime!(2025-11-20 12:05 +10);

        assert!(!do_time_slots_overlap(s1, e1, s2, e2, 0));
        assert!(do_time_slots_overlap(s1, e1, s2, e2, 15));

        // a gap of exactly the buffer is allowed
        let s3 = datetime!(2025-11-20 11:15 +10);
        let e3 = datetime!(2025-11-20 12:15 +10);
        assert!(!do_time_slots_overlap(s1, e1, s3, e3, 15));
    }

    #[test]
    fn today_is_never_in_the_past() {
        let now = datetime!(2025-11-20 09:00 +10);
        assert!(is_date_in_past(
            datetime!(2025-11-19 23:00 +10),
            now,
            brisbane()
        ));
        assert!(!is_date_in_past(
            datetime!(2025-11-20 06:00 +10),
            now,
            brisbane()
        ));
        assert!(!is_date_in_past(
            datetime!(2025-11-21 06:00 +10),
            now,
            brisbane()
        ));
    }

    #[test]
    fn past_comparison_uses_the_zone_not_utc() {
        // 2025-11-19 23:00 UTC is already the 20th in Brisbane
        let now = datetime!(2025-11-19 23:00 UTC);
        assert!(!is_date_in_past(
            datetime!(2025-11-20 00:30 +10),
            now,
            brisbane()
        ));
    }

    #[test]
    fn week_starts_on_civil_monday() {
        let monday = create_date_time_in_timezone("2025-11-17", "00:00", brisbane()).unwrap();

        let thursday = create_date_time_in_timezone("2025-11-20", "15:00", brisbane()).unwrap();
        assert_eq!(thursday.week_start_in(brisbane()).unwrap(), monday);

        let sunday = create_date_time_in_timezone("2025-11-23", "23:59", brisbane()).unwrap();
        assert_eq!(sunday.week_start_in(brisbane()).unwrap(), monday);

        assert_eq!(monday.week_start_in(brisbane()).unwrap(), monday);
    }

    #[test]
    fn day_start_is_civil_midnight() {
        let afternoon = create_date_time_in_timezone("2025-11-20", "15:00", brisbane()).unwrap();
        assert_eq!(
            afternoon.day_start_in(brisbane()).unwrap(),
            create_date_in_timezone("2025-11-20", brisbane()).unwrap()
        );
    }
}
