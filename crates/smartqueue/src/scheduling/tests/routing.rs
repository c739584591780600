use super::common::*;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_vec(payload).expect("serialize payload"),
        ))
        .expect("request")
}

#[tokio::test]
async fn recommendations_route_ranks_slots_with_explanations() {
    let appointments: Vec<_> = (0..6)
        .map(|_| record("2026-01-17", "09:00", "scheduled"))
        .collect();
    let payload = json!({
        "date": "2026-01-17",
        "serviceId": "hosp-opd",
        "appointments": appointments,
        "include_explanations": true,
    });

    let response = router()
        .oneshot(post_json("/api/v1/slots/recommendations", &payload))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["service_id"], "hosp-opd");
    let slots = body["slots"].as_array().expect("slots array");
    assert_eq!(slots.len(), 9);
    let last = slots.last().expect("last slot");
    assert_eq!(last["time"], "09:00");
    assert_eq!(last["congestion"], "High");
    assert_eq!(last["explanation"], "Currently 100% booked");
}

#[tokio::test]
async fn recommendations_omit_explanations_by_default() {
    let payload = json!({ "date": "2026-01-17", "service_id": "hosp-opd" });

    let response = router()
        .oneshot(post_json("/api/v1/slots/recommendations", &payload))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert!(body["slots"][0].get("explanation").is_none());
    assert_eq!(body["slots"][0]["score"], 100);
}

#[tokio::test]
async fn malformed_appointment_is_unprocessable() {
    let payload = json!({
        "date": "2026-01-17",
        "service_id": "hosp-opd",
        "appointments": [
            { "date": "2026-01-17", "timeSlot": "09:00", "status": "scheduled" },
            { "date": "2026-01-17", "status": "scheduled" }
        ],
    });

    let response = router()
        .oneshot(post_json("/api/v1/slots/recommendations", &payload))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    let message = body["error"].as_str().expect("error message");
    assert!(message.contains("#1"));
    assert!(message.contains("time_slot"));
}

#[tokio::test]
async fn service_profile_requires_known_service() {
    let payload = json!({
        "date": "2026-01-17",
        "service_id": "post-office",
        "use_service_profile": true,
    });

    let response = router()
        .oneshot(post_json("/api/v1/slots/recommendations", &payload))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn service_profile_applies_catalog_capacity() {
    let payload = json!({
        "date": "2026-01-17",
        "service_id": "rto-rc",
        "use_service_profile": true,
    });

    let response = router()
        .oneshot(post_json("/api/v1/slots/recommendations", &payload))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["slots"][0]["capacity"], 4);
}

#[tokio::test]
async fn trend_route_returns_points() {
    let payload = json!({
        "appointments": [
            record("2026-01-17", "09:00", "scheduled"),
            record("2026-01-17", "09:00", "completed"),
            record("2026-01-18", "10:00", "cancelled"),
        ],
    });

    let response = router()
        .oneshot(post_json("/api/v1/slots/trend", &payload))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(
        body,
        json!([
            { "slot_label": "09:00", "count": 2, "trend": "stable" },
            { "slot_label": "10:00", "count": 1, "trend": "decreasing" }
        ])
    );
}

#[tokio::test]
async fn trend_route_rejects_unknown_status() {
    let payload = json!({
        "appointments": [ record("2026-01-17", "09:00", "rescheduled") ],
    });

    let response = router()
        .oneshot(post_json("/api/v1/slots/trend", &payload))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn peaks_route_reports_reference_and_detected() {
    let response = router()
        .oneshot(
            Request::get("/api/v1/slots/peaks")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["reference"], json!(["09:00", "10:00", "16:00"]));
    assert_eq!(body["detected"], json!(["10:00", "16:00"]));
}

#[tokio::test]
async fn services_route_lists_catalog() {
    let response = router()
        .oneshot(
            Request::get("/api/v1/services")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let services = body.as_array().expect("array");
    assert_eq!(services.len(), 8);
    assert_eq!(services[0]["id"], "hosp-opd");
    assert_eq!(services[0]["category"], "hospital");
}
