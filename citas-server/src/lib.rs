//! citas-server: HTTP API for medical appointments
//!
//! Create an appointment, list appointments by date, fetch one by id.
//! Storage is a single SQLite table reached through a pooled, per-request
//! connection.

pub mod db;
pub mod http;
pub mod models;

pub use db::{Database, DbError};
pub use http::{build_router, run_server, ApiError, ServerConfig};
pub use models::{Appointment, AppointmentCreate, PublicAppointment};
