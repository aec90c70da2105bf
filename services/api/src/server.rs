use crate::cli::ServeArgs;
use crate::infra::{load_registry, AppState, InMemoryRecordStore};
use crate::routes::with_scoring_routes;
use admission_score::config::AppConfig;
use admission_score::error::AppError;
use admission_score::scoring::{ProgramRegistry, ScoreService};
use admission_score::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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

    let registry = load_registry(args.programs.take(), &config)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let programs = registry.len();
    let service = score_service(registry, &config);

    let app = with_scoring_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, programs, "admission score engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Scoring service over an empty in-memory record store.
fn score_service(
    registry: ProgramRegistry,
    config: &AppConfig,
) -> Arc<ScoreService<InMemoryRecordStore>> {
    Arc::new(
        ScoreService::new(
            Arc::new(registry),
            Arc::new(InMemoryRecordStore::default()),
        )
        .with_score_epsilon(config.scoring.score_epsilon),
    )
}
