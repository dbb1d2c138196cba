//! conneg library crate for testing.
//!
//! The main binary is in main.rs.

pub mod commands;
pub mod config;
pub mod telemetry;
