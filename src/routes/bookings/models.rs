use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::scheduling::models::{BookingRequest, ExistingBooking, TimeSlot};

// Send payloads
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ValidateBookingPayload {
    pub request: BookingRequest,
    /// Confirmed-booking snapshot for the affected user and period, supplied
    /// by the caller; the engine queries no store.
    #[serde(default)]
    pub existing_bookings: Vec<ExistingBooking>,
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct SlotsPayload {
    /// Civil date in the scheduling timezone, `YYYY-MM-DD`.
    pub date: String,
    #[validate(range(min = 15, max = 480))]
    pub duration: u32,
    #[serde(default)]
    pub existing_bookings: Vec<ExistingBooking>,
}

// Receive payloads
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailableSlots {
    pub date: String,
    pub duration: u32,
    pub slots: Vec<TimeSlot>,
}
