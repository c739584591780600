use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use serde_json::json;
use tracing::debug;

use super::feed::{NotificationError, NotificationId, NotificationStore};

/// Router exposing the notification panel endpoints.
pub fn notification_router<S>(store: Arc<S>) -> Router
where
    S: NotificationStore + 'static,
{
    Router::new()
        .route("/api/notifications", get(list_handler::<S>))
        .route(
            "/api/notifications/:notification_id/read",
            patch(mark_read_handler::<S>),
        )
        .route("/api/notifications/read-all", post(mark_all_handler::<S>))
        .with_state(store)
}

pub(crate) async fn list_handler<S>(State(store): State<Arc<S>>) -> Response
where
    S: NotificationStore + 'static,
{
    match store.list() {
        Ok(notifications) => (StatusCode::OK, axum::Json(notifications)).into_response(),
        Err(error) => unavailable(error),
    }
}

pub(crate) async fn mark_read_handler<S>(
    State(store): State<Arc<S>>,
    Path(notification_id): Path<String>,
) -> Response
where
    S: NotificationStore + 'static,
{
    let id = NotificationId(notification_id);
    match store.mark_read(&id) {
        Ok(_) => {
            debug!(notification = %id.0, "notification marked as read");
            let payload = json!({
                "status": "success",
                "message": "Notification marked as read",
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(NotificationError::NotFound) => {
            let payload = json!({ "error": NotificationError::NotFound.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => unavailable(error),
    }
}

pub(crate) async fn mark_all_handler<S>(State(store): State<Arc<S>>) -> Response
where
    S: NotificationStore + 'static,
{
    match store.mark_all_read() {
        Ok(changed) => {
            debug!(changed, "all notifications marked as read");
            let payload = json!({
                "status": "success",
                "message": "All notifications marked as read",
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => unavailable(error),
    }
}

fn unavailable(error: NotificationError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
