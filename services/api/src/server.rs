use crate::cli::ServeArgs;
use crate::infra::{build_engine, AppState, InMemoryNotificationStore};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use smartqueue::config::AppConfig;
use smartqueue::error::AppError;
use smartqueue::scheduling::ServiceCatalog;
use smartqueue::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let engine = Arc::new(build_engine(config.engine.clone())?);
    let catalog = Arc::new(ServiceCatalog::standard());
    let notifications = Arc::new(InMemoryNotificationStore::seeded());

    let app = with_service_routes(engine.clone(), catalog.clone(), notifications)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        slot_capacity = engine.config().slot_capacity,
        services = catalog.services().len(),
        "smartqueue backend ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
