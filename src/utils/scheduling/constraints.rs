use serde::{Deserialize, Serialize};
use time::{Duration, Weekday};
use utoipa::ToSchema;

use crate::utils::time::time_to_minutes;

use super::errors::ScheduleError;

/// Tunable scheduling limits. Treated as an immutable value: every validation
/// run captures one snapshot, and admin updates build a whole new record via
/// [`ConstraintsUpdate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SchedulingConstraints {
    pub max_hours_per_week: u32,
    pub max_lessons_per_week: u32,
    pub max_consecutive_lessons: u32,
    pub max_hours_per_day: u32,
    pub max_lessons_per_day: u32,
    /// Wall-clock `HH:mm` in the scheduling timezone.
    pub earliest_start_time: String,
    /// Wall-clock `HH:mm` in the scheduling timezone.
    pub latest_end_time: String,
    pub min_buffer_between_lessons: u32,
    pub max_buffer_between_lessons: u32,
    pub min_lesson_duration: u32,
    pub max_lesson_duration: u32,
    pub allowed_durations: Vec<u32>,
    pub max_advance_booking_days: u32,
    pub min_advance_booking_hours: u32,
    pub max_instructor_hours_per_day: u32,
    pub required_break_after_hours: u32,
    pub min_break_duration: u32,
}

impl Default for SchedulingConstraints {
    fn default() -> Self {
        Self {
            max_hours_per_week: 20,
            max_lessons_per_week: 12,
            max_consecutive_lessons: 3,
            max_hours_per_day: 4,
            max_lessons_per_day: 3,
            earliest_start_time: "07:00".to_string(),
            latest_end_time: "19:00".to_string(),
            min_buffer_between_lessons: 15,
            max_buffer_between_lessons: 120,
            min_lesson_duration: 30,
            max_lesson_duration: 180,
            allowed_durations: vec![45, 60, 90, 120],
            max_advance_booking_days: 90,
            min_advance_booking_hours: 24,
            max_instructor_hours_per_day: 8,
            required_break_after_hours: 4,
            min_break_duration: 30,
        }
    }
}

impl SchedulingConstraints {
    /// Bookable window as minutes of the day. Unparsable or inverted bounds
    /// are an operator error, reported apart from booking violations.
    pub fn booking_window(&self) -> Result<(u16, u16), ScheduleError> {
        let opens = time_to_minutes(&self.earliest_start_time).map_err(|_| {
            ScheduleError::InvalidConstraints(format!(
                "unparsable earliest_start_time `{}`",
                self.earliest_start_time
            ))
        })?;
        let closes = time_to_minutes(&self.latest_end_time).map_err(|_| {
            ScheduleError::InvalidConstraints(format!(
                "unparsable latest_end_time `{}`",
                self.latest_end_time
            ))
        })?;
        if opens >= closes {
            return Err(ScheduleError::InvalidConstraints(format!(
                "earliest_start_time {} is not before latest_end_time {}",
                self.earliest_start_time, self.latest_end_time
            )));
        }
        Ok((opens, closes))
    }

    pub fn min_buffer(&self) -> Duration {
        Duration::minutes(self.min_buffer_between_lessons as i64)
    }

    pub fn apply(&self, update: ConstraintsUpdate) -> Self {
        Self {
            max_hours_per_week: update.max_hours_per_week.unwrap_or(self.max_hours_per_week),
            max_lessons_per_week: update
                .max_lessons_per_week
                .unwrap_or(self.max_lessons_per_week),
            max_consecutive_lessons: update
                .max_consecutive_lessons
                .unwrap_or(self.max_consecutive_lessons),
            max_hours_per_day: update.max_hours_per_day.unwrap_or(self.max_hours_per_day),
            max_lessons_per_day: update
                .max_lessons_per_day
                .unwrap_or(self.max_lessons_per_day),
            earliest_start_time: update
                .earliest_start_time
                .unwrap_or_else(|| self.earliest_start_time.clone()),
            latest_end_time: update
                .latest_end_time
                .unwrap_or_else(|| self.latest_end_time.clone()),
            min_buffer_between_lessons: update
                .min_buffer_between_lessons
                .unwrap_or(self.min_buffer_between_lessons),
            max_buffer_between_lessons: update
                .max_buffer_between_lessons
                .unwrap_or(self.max_buffer_between_lessons),
            min_lesson_duration: update
                .min_lesson_duration
                .unwrap_or(self.min_lesson_duration),
            max_lesson_duration: update
                .max_lesson_duration
                .unwrap_or(self.max_lesson_duration),
            allowed_durations: update
                .allowed_durations
                .unwrap_or_else(|| self.allowed_durations.clone()),
            max_advance_booking_days: update
                .max_advance_booking_days
                .unwrap_or(self.max_advance_booking_days),
            min_advance_booking_hours: update
                .min_advance_booking_hours
                .unwrap_or(self.min_advance_booking_hours),
            max_instructor_hours_per_day: update
                .max_instructor_hours_per_day
                .unwrap_or(self.max_instructor_hours_per_day),
            required_break_after_hours: update
                .required_break_after_hours
                .unwrap_or(self.required_break_after_hours),
            min_break_duration: update.min_break_duration.unwrap_or(self.min_break_duration),
        }
    }
}

/// Partial admin update; `None` keeps the current value.
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ConstraintsUpdate {
    pub max_hours_per_week: Option<u32>,
    pub max_lessons_per_week: Option<u32>,
    pub max_consecutive_lessons: Option<u32>,
    pub max_hours_per_day: Option<u32>,
    pub max_lessons_per_day: Option<u32>,
    pub earliest_start_time: Option<String>,
    pub latest_end_time: Option<String>,
    pub min_buffer_between_lessons: Option<u32>,
    pub max_buffer_between_lessons: Option<u32>,
    pub min_lesson_duration: Option<u32>,
    pub max_lesson_duration: Option<u32>,
    pub allowed_durations: Option<Vec<u32>>,
    pub max_advance_booking_days: Option<u32>,
    pub min_advance_booking_hours: Option<u32>,
    pub max_instructor_hours_per_day: Option<u32>,
    pub required_break_after_hours: Option<u32>,
    pub min_break_duration: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub enabled: bool,
    pub opens_at: String,
    pub closes_at: String,
}

impl DayHours {
    pub fn open(opens_at: &str, closes_at: &str) -> Self {
        Self {
            enabled: true,
            opens_at: opens_at.to_string(),
            closes_at: closes_at.to_string(),
        }
    }

    pub fn closed() -> Self {
        Self {
            enabled: false,
            opens_at: "00:00".to_string(),
            closes_at: "00:00".to_string(),
        }
    }
}

/// Working hours per weekday, indexed by [`time::Weekday`] rather than by
/// field-name lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSchedule {
    pub monday: DayHours,
    pub tuesday: DayHours,
    pub wednesday: DayHours,
    pub thursday: DayHours,
    pub friday: DayHours,
    pub saturday: DayHours,
    pub sunday: DayHours,
}

impl WeekSchedule {
    pub fn for_weekday(&self, weekday: Weekday) -> &DayHours {
        match weekday {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }
}

impl Default for WeekSchedule {
    fn default() -> Self {
        Self {
            monday: DayHours::open("09:00", "17:00"),
            tuesday: DayHours::open("09:00", "17:00"),
            wednesday: DayHours::open("09:00", "17:00"),
            thursday: DayHours::open("09:00", "17:00"),
            friday: DayHours::open("09:00", "17:00"),
            saturday: DayHours::open("09:00", "15:00"),
            sunday: DayHours::closed(),
        }
    }
}

#[cfg(test)]
mod constraints_tests {
    use super::*;

    #[test]
    fn update_replaces_only_named_fields() {
        let base = SchedulingConstraints::default();
        let next = base.apply(ConstraintsUpdate {
            max_hours_per_week: Some(25),
            earliest_start_time: Some("08:00".to_string()),
            ..Default::default()
        });

        assert_eq!(next.max_hours_per_week, 25);
        assert_eq!(next.earliest_start_time, "08:00");
        assert_eq!(next.latest_end_time, base.latest_end_time);
        assert_eq!(next.allowed_durations, base.allowed_durations);
    }

    #[test]
    fn empty_update_is_identity() {
        let base = SchedulingConstraints::default();
        assert_eq!(base.apply(ConstraintsUpdate::default()), base);
    }

    #[test]
    fn booking_window_parses_defaults() {
        let (opens, closes) = SchedulingConstraints::default().booking_window().unwrap();
        assert_eq!(opens, 7 * 60);
        assert_eq!(closes, 19 * 60);
    }

    #[test]
    fn booking_window_rejects_bad_config() {
        let mut constraints = SchedulingConstraints::default();
        constraints.earliest_start_time = "7am".to_string();
        assert!(matches!(
            constraints.booking_window(),
            Err(ScheduleError::InvalidConstraints(_))
        ));

        let mut inverted = SchedulingConstraints::default();
        inverted.earliest_start_time = "19:00".to_string();
        inverted.latest_end_time = "07:00".to_string();
        assert!(matches!(
            inverted.booking_window(),
            Err(ScheduleError::InvalidConstraints(_))
        ));
    }

    #[test]
    fn schedule_lookup_matches_weekday() {
        let schedule = WeekSchedule::default();
        assert!(schedule.for_weekday(Weekday::Thursday).enabled);
        assert_eq!(schedule.for_weekday(Weekday::Saturday).closes_at, "15:00");
        assert!(!schedule.for_weekday(Weekday::Sunday).enabled);
    }
}
