//! Route handlers organized by resource

pub mod appointments;
pub mod health;
