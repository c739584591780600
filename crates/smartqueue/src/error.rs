use crate::config::ConfigError;
use crate::scheduling::{AppointmentError, EngineConfigError, ImportError, ServiceId};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Import(ImportError),
    Appointment(AppointmentError),
    Engine(EngineConfigError),
    UnknownService(ServiceId),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Appointment(err) => write!(f, "malformed appointment: {}", err),
            AppError::Engine(err) => write!(f, "engine configuration error: {}", err),
            AppError::UnknownService(id) => write!(f, "unknown service '{}'", id),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Appointment(err) => Some(err),
            AppError::Engine(err) => Some(err),
            AppError::UnknownService(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::Appointment(_) | AppError::Engine(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UnknownService(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ImportError> for AppError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

impl From<AppointmentError> for AppError {
    fn from(value: AppointmentError) -> Self {
        Self::Appointment(value)
    }
}

impl From<EngineConfigError> for AppError {
    fn from(value: EngineConfigError) -> Self {
        Self::Engine(value)
    }
}
