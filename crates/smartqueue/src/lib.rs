//! SmartQueue slot recommendation engine.
//!
//! The [`scheduling`] module ranks the hourly slots of a business day for a
//! requested date using current bookings and a static table of historical
//! booking counts. The remaining modules carry the pieces a host needs around
//! it: environment configuration, telemetry, appointment import, and the
//! in-process notification feed.

pub mod config;
pub mod error;
pub mod notifications;
pub mod scheduling;
pub mod telemetry;
