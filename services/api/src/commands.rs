use crate::infra::{build_engine, load_appointments};
use chrono::NaiveDate;
use clap::Args;
use smartqueue::config::AppConfig;
use smartqueue::error::AppError;
use smartqueue::scheduling::{
    analyze_congestion_trend, explain_slot, predict_peak_hours, ServiceCatalog, ServiceId, Slot,
    SlotEngine, SlotLabel, TrendPoint,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Appointment date (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: NaiveDate,
    /// Service identifier, e.g. hosp-opd
    #[arg(long)]
    pub(crate) service: String,
    /// Appointment export (.csv or JSON); defaults to the demo bookings
    #[arg(long)]
    pub(crate) appointments: Option<PathBuf>,
    /// Use the service's own capacity and average service time
    #[arg(long)]
    pub(crate) service_profile: bool,
    /// Print the rationale under each slot
    #[arg(long)]
    pub(crate) explain: bool,
}

#[derive(Args, Debug)]
pub(crate) struct TrendArgs {
    /// Appointment export (.csv or JSON); defaults to the demo bookings
    #[arg(long)]
    pub(crate) appointments: Option<PathBuf>,
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        date,
        service,
        appointments,
        service_profile,
        explain,
    } = args;

    let config = AppConfig::load()?;
    let engine = build_engine(config.engine)?;
    let appointments = load_appointments(appointments.as_deref())?;
    let service_id = ServiceId(service);
    let engine = if service_profile {
        profile_engine(&engine, &service_id)?
    } else {
        engine
    };

    let slots = engine.recommend(date, &service_id, &appointments);
    println!(
        "Slot recommendations for {} on {} ({} bookings considered)",
        service_id,
        date,
        appointments.len()
    );
    render_slots(&slots, explain);
    Ok(())
}

pub(crate) fn run_trend(args: TrendArgs) -> Result<(), AppError> {
    let appointments = load_appointments(args.appointments.as_deref())?;
    let points = analyze_congestion_trend(&appointments);

    println!("Congestion trend ({} appointments)", appointments.len());
    render_trend(&points);
    Ok(())
}

pub(crate) fn run_peaks() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = build_engine(config.engine)?;

    println!("Reference peak hours: {}", join_labels(&predict_peak_hours()));
    println!(
        "Detected from history: {}",
        join_labels(&engine.detected_peak_hours())
    );
    Ok(())
}

pub(crate) fn run_services() -> Result<(), AppError> {
    let catalog = ServiceCatalog::standard();
    println!("Configured services");
    for service in catalog.services() {
        println!(
            "- {:<15} {} ({}) | {:?} | {} per slot | ~{} min{}",
            service.id.as_str(),
            service.name,
            service.name_hindi,
            service.category,
            service.capacity,
            service.average_minutes,
            if service.enabled { "" } else { " | disabled" }
        );
    }
    Ok(())
}

pub(crate) fn profile_engine(
    engine: &SlotEngine,
    service_id: &ServiceId,
) -> Result<SlotEngine, AppError> {
    let catalog = ServiceCatalog::standard();
    let service = catalog
        .find(service_id)
        .ok_or_else(|| AppError::UnknownService(service_id.clone()))?;
    Ok(engine.for_service(service)?)
}

pub(crate) fn render_slots(slots: &[Slot], explain: bool) {
    for (rank, slot) in slots.iter().enumerate() {
        println!("{}", slot_line(rank + 1, slot));
        if explain {
            println!("     {}", explain_slot(slot));
        }
    }
}

pub(crate) fn render_trend(points: &[TrendPoint]) {
    if points.is_empty() {
        println!("- no appointments");
        return;
    }
    for point in points {
        println!(
            "- {} | {:>3} bookings | {:?}",
            point.slot_label, point.count, point.trend
        );
    }
}

pub(crate) fn slot_line(rank: usize, slot: &Slot) -> String {
    format!(
        "{rank:>2}. {} | score {:>3} | {}/{} booked | {:<6} congestion | ~{} min wait",
        slot.time,
        slot.score,
        slot.booked,
        slot.capacity,
        slot.congestion.label(),
        slot.estimated_wait
    )
}

pub(crate) fn join_labels(labels: &[SlotLabel]) -> String {
    if labels.is_empty() {
        return "none".to_string();
    }
    labels
        .iter()
        .map(SlotLabel::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartqueue::scheduling::recommend_slots;

    #[test]
    fn slot_line_summarizes_slot() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 17).expect("valid date");
        let slots = recommend_slots(date, &ServiceId::from("hosp-opd"), &[]);

        let line = slot_line(1, &slots[0]);

        assert_eq!(
            line,
            " 1. 09:00 | score 100 | 0/6 booked | Low    congestion | ~0 min wait"
        );
    }

    #[test]
    fn unknown_service_profile_is_an_error() {
        let engine = SlotEngine::standard();
        let err = profile_engine(&engine, &ServiceId::from("post-office")).expect_err("unknown");
        assert!(matches!(err, AppError::UnknownService(_)));
    }

    #[test]
    fn peak_labels_are_joined() {
        assert_eq!(join_labels(&predict_peak_hours()), "09:00, 10:00, 16:00");
        assert_eq!(join_labels(&[]), "none");
    }
}
