//! Command implementations for the citas CLI

pub mod serve;

pub use serve::run_serve;
