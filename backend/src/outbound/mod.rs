//! Outbound adapters implementing the driven ports.
//!
//! - `persistence`: PostgreSQL repositories using Diesel.
//! - `cache`: in-process view revision tracking.

pub mod cache;
pub mod persistence;
