pub mod bookings;
pub mod constraints;
