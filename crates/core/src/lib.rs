//! Core business logic for newsdesk-rs.

pub mod services;

pub use services::*;
