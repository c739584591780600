use crate::scheduling::{EngineConfig, EngineConfigError};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub engine: EngineConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let telemetry = TelemetryConfig {
            log_level,
            show_targets: environment != AppEnvironment::Production,
            ansi: false,
        };

        let engine = engine_from_env()?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry,
            engine,
        })
    }
}

fn engine_from_env() -> Result<EngineConfig, ConfigError> {
    let mut engine = EngineConfig::default();

    if let Some(capacity) = parse_var::<u32>("APP_SLOT_CAPACITY")? {
        engine.slot_capacity = capacity;
    }
    if let Some(rate) = parse_var::<f64>("APP_NO_SHOW_RATE")? {
        engine.no_show_rate = rate;
    }
    if let Some(probability) = parse_var::<f64>("APP_WALK_IN_PROBABILITY")? {
        engine.walk_in_probability = probability;
    }
    if let Some(minutes) = parse_var::<u32>("APP_AVERAGE_SERVICE_MINUTES")? {
        engine.average_service_minutes = minutes;
    }

    engine.validate().map_err(ConfigError::Engine)?;
    Ok(engine)
}

fn parse_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value: raw }),
        Err(_) => Ok(None),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Log output controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub show_targets: bool,
    pub ansi: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { name: &'static str, value: String },
    Engine(EngineConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { name, value } => {
                write!(f, "{name} must be numeric, got '{value}'")
            }
            ConfigError::Engine(err) => write!(f, "invalid engine settings: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::Engine(err) => Some(err),
        }
    }
}
