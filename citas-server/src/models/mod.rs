//! Appointment models with validation
//!
//! Client input is checked right after deserialization.
//! Invalid input returns ValidationError, not panic.

pub mod appointment;
pub mod validation;

pub use appointment::{
    parse_timestamp, Appointment, AppointmentCreate, PublicAppointment, DEFAULT_REASON,
    MAX_PATIENT_LEN,
};
pub use validation::{Validate, ValidationError};
