use crate::routes::{bookings::models::*, bookings::*, constraints::*};
use crate::utils::scheduling::constraints::{ConstraintsUpdate, SchedulingConstraints};
use crate::utils::scheduling::models::*;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
info(title = "Drivebook", description = "Driving lesson scheduling", ),
paths(
validate_booking,
available_slots,
get_constraints,
update_constraints,
),
components(schemas(
ValidateBookingPayload,
SlotsPayload,
AvailableSlots,
BookingRequest,
ExistingBooking,
BookingStatus,
TimeSlot,
ValidationResult,
SchedulingConstraints,
ConstraintsUpdate,
)),
tags((name = "bookings"),(name = "constraints"))
)]
pub struct ApiDoc;
