use serde::{Deserialize, Serialize};

use super::super::catalog::Service;

/// Operating constants for slot scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub slot_capacity: u32,
    /// Fraction of bookings expected not to arrive.
    pub no_show_rate: f64,
    /// Chance of unscheduled arrivals competing for the slot.
    pub walk_in_probability: f64,
    pub moving_average_window: usize,
    /// Multiple of the overall average above which a slot counts as peak.
    pub peak_threshold: f64,
    pub average_service_minutes: u32,
    /// Booked count above which the congestion buffer applies to waits.
    pub congestion_buffer_after: u32,
    pub congestion_buffer_factor: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            slot_capacity: 6,
            no_show_rate: 0.12,
            walk_in_probability: 0.15,
            moving_average_window: 7,
            peak_threshold: 1.3,
            average_service_minutes: 15,
            congestion_buffer_after: 5,
            congestion_buffer_factor: 1.2,
        }
    }
}

impl EngineConfig {
    /// Copy of this configuration using the service's own capacity and pace.
    pub fn tuned_for(&self, service: &Service) -> Self {
        Self {
            slot_capacity: service.capacity,
            average_service_minutes: service.average_minutes,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), EngineConfigError> {
        if self.slot_capacity == 0 {
            return Err(EngineConfigError::ZeroCapacity);
        }
        if self.moving_average_window == 0 {
            return Err(EngineConfigError::ZeroWindow);
        }
        for (name, value) in [
            ("no_show_rate", self.no_show_rate),
            ("walk_in_probability", self.walk_in_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngineConfigError::RateOutOfRange { name, value });
            }
        }
        if !(self.peak_threshold.is_finite() && self.peak_threshold > 0.0) {
            return Err(EngineConfigError::InvalidPeakThreshold(self.peak_threshold));
        }
        if !(self.congestion_buffer_factor.is_finite() && self.congestion_buffer_factor >= 1.0) {
            return Err(EngineConfigError::InvalidBufferFactor(
                self.congestion_buffer_factor,
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineConfigError {
    #[error("slot capacity must be greater than zero")]
    ZeroCapacity,
    #[error("moving average window must be greater than zero")]
    ZeroWindow,
    #[error("{name} must be within [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },
    #[error("peak threshold must be a positive number, got {0}")]
    InvalidPeakThreshold(f64),
    #[error("congestion buffer factor must be at least 1.0, got {0}")]
    InvalidBufferFactor(f64),
}
