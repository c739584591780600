use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::scheduling::{
    scheduling_router, Appointment, AppointmentRecord, AppointmentStatus, CongestionLevel,
    ServiceCatalog, ServiceId, Slot, SlotEngine, SlotLabel,
};

pub(super) fn target_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 17).expect("valid date")
}

pub(super) fn opd() -> ServiceId {
    ServiceId::from("hosp-opd")
}

pub(super) fn scheduled(label: &str) -> Appointment {
    Appointment::new(target_date(), label, AppointmentStatus::Scheduled)
}

pub(super) fn with_status(label: &str, status: AppointmentStatus) -> Appointment {
    Appointment::new(target_date(), label, status)
}

/// `count` scheduled bookings at `label` on the target date.
pub(super) fn bookings(label: &str, count: usize) -> Vec<Appointment> {
    (0..count).map(|_| scheduled(label)).collect()
}

pub(super) fn slot_for<'a>(slots: &'a [Slot], label: &str) -> &'a Slot {
    slots
        .iter()
        .find(|slot| slot.time == SlotLabel::from(label))
        .unwrap_or_else(|| panic!("slot {label} present"))
}

pub(super) fn slot(booked: u32, capacity: u32, score: u8, estimated_wait: u32) -> Slot {
    Slot {
        id: format!("2026-01-17-{booked}"),
        time: SlotLabel::from("11:00"),
        capacity,
        booked,
        congestion: CongestionLevel::from_utilization(f64::from(booked) / f64::from(capacity)),
        score,
        estimated_wait,
    }
}

pub(super) fn record(date: &str, time_slot: &str, status: &str) -> AppointmentRecord {
    AppointmentRecord {
        id: None,
        service_id: Some("hosp-opd".to_string()),
        date: Some(date.to_string()),
        time_slot: Some(time_slot.to_string()),
        status: Some(status.to_string()),
    }
}

pub(super) fn router() -> axum::Router {
    scheduling_router(
        Arc::new(SlotEngine::standard()),
        Arc::new(ServiceCatalog::standard()),
    )
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
