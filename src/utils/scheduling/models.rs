use serde::{Deserialize, Serialize};
use time::{serde::timestamp, Duration, OffsetDateTime};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingRequest {
    pub user_id: Uuid,
    #[serde(with = "timestamp")]
    pub starts_at: OffsetDateTime,
    #[serde(with = "timestamp")]
    pub ends_at: OffsetDateTime,
    /// Lesson length in minutes, must match `ends_at - starts_at`.
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_type: Option<String>,
}

impl BookingRequest {
    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.starts_at, self.ends_at)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExistingBooking {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(with = "timestamp")]
    pub starts_at: OffsetDateTime,
    #[serde(with = "timestamp")]
    pub ends_at: OffsetDateTime,
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_type: Option<String>,
}

impl ExistingBooking {
    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.starts_at, self.ends_at)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimeSlot {
    #[serde(with = "timestamp")]
    pub start: OffsetDateTime,
    #[serde(with = "timestamp")]
    pub end: OffsetDateTime,
}

impl From<TimeRange> for TimeSlot {
    fn from(range: TimeRange) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

/// Aggregated verdict of one validation run. Only `errors` block a booking;
/// warnings and suggestions are advisory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn error(&mut self, info: impl ToString) {
        self.errors.push(info.to_string());
        self.is_valid = false;
    }

    pub fn warn(&mut self, info: impl ToString) {
        self.warnings.push(info.to_string());
    }

    pub fn suggest(&mut self, info: impl ToString) {
        self.suggestions.push(info.to_string());
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct TimeRange {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

impl TimeRange {
    pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Self {
        Self { start, end }
    }

    pub fn new_relative(start: OffsetDateTime, length: Duration) -> Self {
        Self::new(start, start + length)
    }

    pub fn is_overlapping(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn is_before(&self, other: &Self) -> bool {
        self.end <= other.start
    }

    pub fn is_after(&self, other: &Self) -> bool {
        self.start >= other.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}
