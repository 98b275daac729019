use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryCaseFieldStore, InMemoryRoutingRepository, InMemoryStatusLedger,
};
use crate::routes::app_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

use erms::config::AppConfig;
use erms::error::AppError;
use erms::telemetry;
use erms::workflows::routing::FileRoutingService;
use erms::workflows::status::CaseStatusService;

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

    let repository = Arc::new(InMemoryRoutingRepository::default());
    let fields = Arc::new(InMemoryCaseFieldStore::default());
    let ledger = Arc::new(InMemoryStatusLedger::default());
    let routing_service = Arc::new(FileRoutingService::new(repository, fields.clone()));
    let status_service = Arc::new(CaseStatusService::new(fields, ledger));

    let app = app_router(routing_service, status_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "retirement case tracker ready");

    axum::serve(listener, app).await?;
    Ok(())
}
