use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::catalog::{Service, ServiceCatalog};
use super::domain::{validate_records, AppointmentRecord, ServiceId, Slot, SlotLabel};
use super::engine::{predict_peak_hours, SlotEngine};
use super::explain::explain_slot;
use super::trend::{analyze_congestion_trend, TrendPoint};
use crate::error::AppError;

#[derive(Clone)]
pub(crate) struct SchedulingState {
    engine: Arc<SlotEngine>,
    catalog: Arc<ServiceCatalog>,
}

/// Router exposing slot ranking, trend analysis, and the service catalog.
pub fn scheduling_router(engine: Arc<SlotEngine>, catalog: Arc<ServiceCatalog>) -> Router {
    Router::new()
        .route(
            "/api/v1/slots/recommendations",
            post(recommendations_handler),
        )
        .route("/api/v1/slots/trend", post(trend_handler))
        .route("/api/v1/slots/peaks", get(peaks_handler))
        .route("/api/v1/services", get(services_handler))
        .with_state(SchedulingState { engine, catalog })
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub date: NaiveDate,
    #[serde(alias = "serviceId")]
    pub service_id: ServiceId,
    #[serde(default)]
    pub appointments: Vec<AppointmentRecord>,
    #[serde(default)]
    pub include_explanations: bool,
    #[serde(default)]
    pub use_service_profile: bool,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub date: NaiveDate,
    pub service_id: ServiceId,
    pub slots: Vec<SlotView>,
}

#[derive(Debug, Serialize)]
pub struct SlotView {
    #[serde(flatten)]
    pub slot: Slot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrendRequest {
    #[serde(default)]
    pub appointments: Vec<AppointmentRecord>,
}

#[derive(Debug, Serialize)]
pub struct PeakHoursView {
    pub reference: Vec<SlotLabel>,
    pub detected: Vec<SlotLabel>,
}

pub(crate) async fn recommendations_handler(
    State(state): State<SchedulingState>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let RecommendationRequest {
        date,
        service_id,
        appointments,
        include_explanations,
        use_service_profile,
    } = request;

    let appointments = validate_records(appointments)?;

    let tuned = if use_service_profile {
        let service = state
            .catalog
            .find(&service_id)
            .ok_or_else(|| AppError::UnknownService(service_id.clone()))?;
        Some(state.engine.for_service(service)?)
    } else {
        None
    };
    let engine = tuned.as_ref().unwrap_or(state.engine.as_ref());

    let slots = engine
        .recommend(date, &service_id, &appointments)
        .into_iter()
        .map(|slot| {
            let explanation = include_explanations.then(|| explain_slot(&slot));
            SlotView { slot, explanation }
        })
        .collect();

    Ok(Json(RecommendationResponse {
        date,
        service_id,
        slots,
    }))
}

pub(crate) async fn trend_handler(
    Json(request): Json<TrendRequest>,
) -> Result<Json<Vec<TrendPoint>>, AppError> {
    let appointments = validate_records(request.appointments)?;
    Ok(Json(analyze_congestion_trend(&appointments)))
}

pub(crate) async fn peaks_handler(State(state): State<SchedulingState>) -> Json<PeakHoursView> {
    Json(PeakHoursView {
        reference: predict_peak_hours(),
        detected: state.engine.detected_peak_hours(),
    })
}

pub(crate) async fn services_handler(
    State(state): State<SchedulingState>,
) -> Json<Vec<Service>> {
    Json(state.catalog.services().to_vec())
}
