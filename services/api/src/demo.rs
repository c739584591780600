use crate::commands::{join_labels, render_slots, render_trend};
use crate::infra::{build_engine, load_appointments};
use chrono::{Local, NaiveDate};
use clap::Args;
use smartqueue::error::AppError;
use smartqueue::scheduling::{
    analyze_congestion_trend, predict_peak_hours, Appointment, EngineConfig, ServiceCatalog,
};

const DEMO_TOP_SLOTS: usize = 3;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Day to rank (YYYY-MM-DD). Defaults to the day of the demo bookings.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let engine = build_engine(EngineConfig::default())?;
    let appointments = load_appointments(None)?;
    let date = args.date.unwrap_or_else(|| demo_date(&appointments));
    let catalog = ServiceCatalog::standard();

    println!("SmartQueue slot recommendation demo ({date})");
    println!(
        "- {} demo bookings | {} services enabled",
        appointments.len(),
        catalog.enabled().count()
    );

    for service in catalog.enabled().take(2) {
        let slots = engine.recommend(date, &service.id, &appointments);
        println!(
            "\nTop {} slots for {} ({})",
            DEMO_TOP_SLOTS, service.name, service.id
        );
        render_slots(&slots[..DEMO_TOP_SLOTS.min(slots.len())], true);

        if let Some(last) = slots.last() {
            println!(
                "  Least recommended: {} (score {}, {} booked)",
                last.time, last.score, last.booked
            );
        }
    }

    println!("\nCongestion trend");
    render_trend(&analyze_congestion_trend(&appointments));

    println!("\nPeak hours");
    println!("- reference: {}", join_labels(&predict_peak_hours()));
    println!(
        "- detected from history: {}",
        join_labels(&engine.detected_peak_hours())
    );

    Ok(())
}

fn demo_date(appointments: &[Appointment]) -> NaiveDate {
    appointments
        .first()
        .map(|appointment| appointment.date)
        .unwrap_or_else(|| Local::now().date_naive())
}
