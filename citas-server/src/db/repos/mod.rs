//! Repository implementations for database access
//!
//! Each repository borrows the request's connection and uses the
//! statements generated from the table definition in [`crate::db::schema`].

pub mod appointments;

pub use appointments::AppointmentRepo;
