mod config;
mod rules;

pub use config::{EngineConfig, EngineConfigError};

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use super::catalog::Service;
use super::domain::{Appointment, CongestionLevel, ServiceId, Slot, SlotLabel};
use super::history::{is_peak, moving_average, HistoricalPatterns};
use rules::{estimated_wait, score_slot, SlotSignals};

/// Labels the reference deployment treats as structurally busy.
const REFERENCE_PEAK_HOURS: [&str; 3] = ["09:00", "10:00", "16:00"];

/// Stateless ranker applying the scoring constants to a day's bookings.
#[derive(Debug, Clone)]
pub struct SlotEngine {
    config: EngineConfig,
    history: Arc<HistoricalPatterns>,
}

impl SlotEngine {
    pub fn new(
        config: EngineConfig,
        history: Arc<HistoricalPatterns>,
    ) -> Result<Self, EngineConfigError> {
        config.validate()?;
        Ok(Self { config, history })
    }

    /// Default constants over the shared historical table.
    pub fn standard() -> Self {
        Self {
            config: EngineConfig::default(),
            history: HistoricalPatterns::standard(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn history(&self) -> &HistoricalPatterns {
        &self.history
    }

    /// Engine sharing this history but using the service's capacity and pace.
    pub fn for_service(&self, service: &Service) -> Result<Self, EngineConfigError> {
        Self::new(self.config.tuned_for(service), Arc::clone(&self.history))
    }

    /// Scores every slot of the business day for `date`, best first.
    ///
    /// Only `scheduled` appointments on `date` count as bookings. `service_id`
    /// does not select a pattern table: all services share one history.
    pub fn recommend(
        &self,
        date: NaiveDate,
        service_id: &ServiceId,
        appointments: &[Appointment],
    ) -> Vec<Slot> {
        let overall_average = self.history.overall_average();

        let mut slots: Vec<Slot> = self
            .history
            .iter()
            .map(|(label, observations)| {
                let booked = appointments
                    .iter()
                    .filter(|appointment| appointment.occupies(date, label))
                    .count();
                let average = moving_average(observations, self.config.moving_average_window);
                let signals = SlotSignals {
                    booked: u32::try_from(booked).unwrap_or(u32::MAX),
                    is_peak: is_peak(average, overall_average, self.config.peak_threshold),
                };
                self.build_slot(date, label, &signals)
            })
            .collect();

        slots.sort_by(|a, b| b.score.cmp(&a.score));

        debug!(
            %date,
            service = %service_id,
            appointments = appointments.len(),
            best = slots.first().map(|slot| slot.time.as_str()).unwrap_or("-"),
            "ranked slot recommendations"
        );

        slots
    }

    /// Slots flagged as peak by the moving-average rule over the history.
    pub fn detected_peak_hours(&self) -> Vec<SlotLabel> {
        self.history
            .peak_labels(self.config.moving_average_window, self.config.peak_threshold)
    }

    fn build_slot(&self, date: NaiveDate, label: &SlotLabel, signals: &SlotSignals) -> Slot {
        let capacity = self.config.slot_capacity;
        let utilization = f64::from(signals.booked) / f64::from(capacity);
        let score = score_slot(signals, &self.config).round() as u8;

        Slot {
            id: format!("{}-{}", date.format("%Y-%m-%d"), label),
            time: label.clone(),
            capacity,
            booked: signals.booked,
            congestion: CongestionLevel::from_utilization(utilization),
            score,
            estimated_wait: estimated_wait(signals.booked, &self.config),
        }
    }
}

/// Ranks the day's slots with the default engine.
pub fn recommend_slots(
    date: NaiveDate,
    service_id: &ServiceId,
    appointments: &[Appointment],
) -> Vec<Slot> {
    SlotEngine::standard().recommend(date, service_id, appointments)
}

/// Fixed list of structurally busy hours, independent of any bookings.
pub fn predict_peak_hours() -> Vec<SlotLabel> {
    REFERENCE_PEAK_HOURS
        .iter()
        .map(|label| SlotLabel::from(*label))
        .collect()
}
