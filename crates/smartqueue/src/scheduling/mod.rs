//! Slot recommendation for appointment booking.
//!
//! Each request recomputes all slots of the business day from the caller's
//! appointments and the immutable [`HistoricalPatterns`] table. Nothing is
//! cached or mutated between calls, so every operation here is a pure
//! function of its inputs and the engine constants.

pub mod catalog;
pub mod domain;
mod engine;
mod explain;
pub mod history;
pub mod import;
pub mod router;
mod trend;

#[cfg(test)]
mod tests;

pub use catalog::{Service, ServiceCatalog, ServiceCategory};
pub use domain::{
    validate_records, Appointment, AppointmentError, AppointmentRecord, AppointmentStatus,
    CongestionLevel, ServiceId, Slot, SlotLabel,
};
pub use engine::{
    predict_peak_hours, recommend_slots, EngineConfig, EngineConfigError, SlotEngine,
};
pub use explain::explain_slot;
pub use history::HistoricalPatterns;
pub use import::{seed_appointments, seed_records, AppointmentImporter, ImportError};
pub use router::scheduling_router;
pub use trend::{analyze_congestion_trend, Trend, TrendPoint};
