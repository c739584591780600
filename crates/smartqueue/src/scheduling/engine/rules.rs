use super::config::EngineConfig;

const UTILIZATION_WEIGHT: f64 = 50.0;
const PEAK_PENALTY: f64 = 20.0;
const WALK_IN_WEIGHT: f64 = 15.0;
const AVAILABILITY_WEIGHT: f64 = 20.0;

/// Share of no-shows credited back as capacity.
const NO_SHOW_DAMPER: f64 = 0.5;
/// Share of walk-in probability that competes for a booked seat.
const WALK_IN_DAMPER: f64 = 0.3;

pub(crate) struct SlotSignals {
    pub booked: u32,
    pub is_peak: bool,
}

/// Desirability before rounding, clamped to `[0, 100]`.
pub(crate) fn score_slot(signals: &SlotSignals, config: &EngineConfig) -> f64 {
    let capacity = f64::from(config.slot_capacity);
    let booked = f64::from(signals.booked);

    let utilization = booked / capacity;
    let effective_capacity = capacity * (1.0 + config.no_show_rate * NO_SHOW_DAMPER);
    let adjusted_utilization = booked / effective_capacity;
    let walk_in_adjustment = config.walk_in_probability * WALK_IN_DAMPER;

    let mut score = 100.0;
    score -= adjusted_utilization * UTILIZATION_WEIGHT;
    if signals.is_peak {
        score -= PEAK_PENALTY;
    }
    score -= walk_in_adjustment * WALK_IN_WEIGHT;
    score += (1.0 - utilization) * AVAILABILITY_WEIGHT;

    score.clamp(0.0, 100.0)
}

/// New bookings queue behind everyone already booked.
pub(crate) fn estimated_wait(booked: u32, config: &EngineConfig) -> u32 {
    let mut wait = f64::from(booked) * f64::from(config.average_service_minutes);
    if booked > config.congestion_buffer_after {
        wait *= config.congestion_buffer_factor;
    }
    wait.round() as u32
}
