use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Time-of-day label identifying an hourly slot, e.g. `09:00`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotLabel(pub String);

impl SlotLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlotLabel {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identifier of a bookable service such as `hosp-opd`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(pub String);

impl ServiceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServiceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Lifecycle state of a booked appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Scheduled,
    Active,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Active => "active",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no-show",
        }
    }

    pub fn parse_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "scheduled" => Some(Self::Scheduled),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            "no-show" => Some(Self::NoShow),
            _ => None,
        }
    }
}

/// Validated appointment read model consumed by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Option<String>,
    pub service_id: Option<ServiceId>,
    pub date: NaiveDate,
    pub time_slot: SlotLabel,
    pub status: AppointmentStatus,
}

impl Appointment {
    pub fn new(date: NaiveDate, time_slot: impl Into<String>, status: AppointmentStatus) -> Self {
        Self {
            id: None,
            service_id: None,
            date,
            time_slot: SlotLabel::new(time_slot),
            status,
        }
    }

    /// True when this appointment holds a seat in `label` on `date`.
    pub fn occupies(&self, date: NaiveDate, label: &SlotLabel) -> bool {
        self.date == date && &self.time_slot == label && self.status == AppointmentStatus::Scheduled
    }
}

/// Loosely typed appointment as received from JSON payloads or CSV exports.
///
/// Every field is optional so that a missing value surfaces as an
/// [`AppointmentError`] naming the record instead of a generic decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<String>,
    #[serde(
        default,
        alias = "serviceId",
        deserialize_with = "empty_string_as_none"
    )]
    pub service_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub date: Option<String>,
    #[serde(
        default,
        alias = "timeSlot",
        deserialize_with = "empty_string_as_none"
    )]
    pub time_slot: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub status: Option<String>,
}

impl AppointmentRecord {
    /// Checks the required fields; `index` is the record position reported on failure.
    pub fn validate(self, index: usize) -> Result<Appointment, AppointmentError> {
        let raw_date = self.date.ok_or(AppointmentError::MissingField {
            index,
            field: "date",
        })?;
        let date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d").map_err(|_| {
            AppointmentError::InvalidDate {
                index,
                value: raw_date.clone(),
            }
        })?;

        let time_slot = self
            .time_slot
            .map(|slot| slot.trim().to_string())
            .ok_or(AppointmentError::MissingField {
                index,
                field: "time_slot",
            })?;

        let raw_status = self.status.ok_or(AppointmentError::MissingField {
            index,
            field: "status",
        })?;
        let status = AppointmentStatus::parse_label(&raw_status).ok_or_else(|| {
            AppointmentError::InvalidStatus {
                index,
                value: raw_status.clone(),
            }
        })?;

        Ok(Appointment {
            id: self.id,
            service_id: self.service_id.map(ServiceId),
            date,
            time_slot: SlotLabel(time_slot),
            status,
        })
    }
}

impl From<&Appointment> for AppointmentRecord {
    fn from(value: &Appointment) -> Self {
        Self {
            id: value.id.clone(),
            service_id: value.service_id.as_ref().map(|id| id.0.clone()),
            date: Some(value.date.format("%Y-%m-%d").to_string()),
            time_slot: Some(value.time_slot.0.clone()),
            status: Some(value.status.label().to_string()),
        }
    }
}

/// Validates a batch, stopping at the first malformed record.
pub fn validate_records(
    records: Vec<AppointmentRecord>,
) -> Result<Vec<Appointment>, AppointmentError> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.validate(index))
        .collect()
}

/// Raised when an appointment record lacks a field the engine depends on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppointmentError {
    #[error("appointment #{index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },
    #[error("appointment #{index} has invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { index: usize, value: String },
    #[error("appointment #{index} has unknown status '{value}'")]
    InvalidStatus { index: usize, value: String },
}

/// Coarse classification of slot utilization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CongestionLevel {
    Low,
    Medium,
    High,
}

impl CongestionLevel {
    pub fn from_utilization(utilization: f64) -> Self {
        if utilization < 0.5 {
            Self::Low
        } else if utilization < 0.8 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CongestionLevel::Low => "Low",
            CongestionLevel::Medium => "Medium",
            CongestionLevel::High => "High",
        }
    }
}

/// A scored candidate slot for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: String,
    pub time: SlotLabel,
    pub capacity: u32,
    pub booked: u32,
    pub congestion: CongestionLevel,
    /// Desirability in `0..=100`, higher is better.
    pub score: u8,
    /// Minutes a new booking is expected to wait.
    pub estimated_wait: u32,
}

impl Slot {
    pub fn utilization(&self) -> f64 {
        f64::from(self.booked) / f64::from(self.capacity)
    }

    pub fn booked_percent(&self) -> u32 {
        (self.utilization() * 100.0).round() as u32
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AppointmentRecord {
        AppointmentRecord {
            id: Some("apt-001".to_string()),
            service_id: Some("hosp-opd".to_string()),
            date: Some("2026-01-17".to_string()),
            time_slot: Some("09:00".to_string()),
            status: Some("scheduled".to_string()),
        }
    }

    #[test]
    fn validate_builds_appointment() {
        let appointment = record().validate(0).expect("valid record");
        assert_eq!(
            appointment.date,
            NaiveDate::from_ymd_opt(2026, 1, 17).expect("valid date")
        );
        assert_eq!(appointment.time_slot, SlotLabel::from("09:00"));
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
        assert_eq!(appointment.service_id, Some(ServiceId::from("hosp-opd")));
    }

    #[test]
    fn missing_time_slot_is_reported_with_index() {
        let mut record = record();
        record.time_slot = None;
        assert_eq!(
            record.validate(3),
            Err(AppointmentError::MissingField {
                index: 3,
                field: "time_slot"
            })
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut record = record();
        record.status = Some("postponed".to_string());
        match record.validate(1) {
            Err(AppointmentError::InvalidStatus { index, value }) => {
                assert_eq!(index, 1);
                assert_eq!(value, "postponed");
            }
            other => panic!("expected invalid status, got {other:?}"),
        }
    }

    #[test]
    fn camel_case_payloads_are_accepted() {
        let json = r#"{"id":"apt-9","serviceId":"rto-rc","date":"2026-01-17","timeSlot":"11:00","status":"no-show","citizenName":"Asha"}"#;
        let record: AppointmentRecord = serde_json::from_str(json).expect("decodes");
        let appointment = record.validate(0).expect("valid");
        assert_eq!(appointment.status, AppointmentStatus::NoShow);
        assert_eq!(appointment.time_slot.as_str(), "11:00");
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let json = r#"{"date":"  ","timeSlot":"09:00","status":"scheduled"}"#;
        let record: AppointmentRecord = serde_json::from_str(json).expect("decodes");
        assert_eq!(
            record.validate(0),
            Err(AppointmentError::MissingField {
                index: 0,
                field: "date"
            })
        );
    }

    #[test]
    fn only_scheduled_appointments_occupy_a_slot() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 17).expect("valid date");
        let label = SlotLabel::from("09:00");
        let scheduled = Appointment::new(date, "09:00", AppointmentStatus::Scheduled);
        let cancelled = Appointment::new(date, "09:00", AppointmentStatus::Cancelled);
        let other_day = Appointment::new(
            date.succ_opt().expect("next day"),
            "09:00",
            AppointmentStatus::Scheduled,
        );

        assert!(scheduled.occupies(date, &label));
        assert!(!cancelled.occupies(date, &label));
        assert!(!other_day.occupies(date, &label));
    }

    #[test]
    fn congestion_thresholds() {
        assert_eq!(CongestionLevel::from_utilization(0.0), CongestionLevel::Low);
        assert_eq!(CongestionLevel::from_utilization(0.49), CongestionLevel::Low);
        assert_eq!(CongestionLevel::from_utilization(0.5), CongestionLevel::Medium);
        assert_eq!(CongestionLevel::from_utilization(0.79), CongestionLevel::Medium);
        assert_eq!(CongestionLevel::from_utilization(0.8), CongestionLevel::High);
        assert_eq!(CongestionLevel::from_utilization(1.5), CongestionLevel::High);
    }
}
