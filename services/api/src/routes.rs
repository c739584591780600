use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use smartqueue::notifications::{notification_router, NotificationStore};
use smartqueue::scheduling::{scheduling_router, ServiceCatalog, SlotEngine};
use std::sync::Arc;

pub(crate) fn with_service_routes<S>(
    engine: Arc<SlotEngine>,
    catalog: Arc<ServiceCatalog>,
    notifications: Arc<S>,
) -> axum::Router
where
    S: NotificationStore + 'static,
{
    scheduling_router(engine, catalog)
        .merge(notification_router(notifications))
        .route("/", axum::routing::get(home))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn home() -> Json<serde_json::Value> {
    Json(json!({ "message": "SmartQueue backend is running" }))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryNotificationStore;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn router() -> axum::Router {
        with_service_routes(
            Arc::new(SlotEngine::standard()),
            Arc::new(ServiceCatalog::standard()),
            Arc::new(InMemoryNotificationStore::seeded()),
        )
    }

    #[tokio::test]
    async fn home_reports_running_backend() {
        let Json(body) = home().await;
        assert_eq!(body["message"], "SmartQueue backend is running");
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn merged_router_serves_slots_and_notifications() {
        let response = router()
            .oneshot(
                Request::get("/api/v1/slots/peaks")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router()
            .oneshot(
                Request::get("/api/notifications")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
