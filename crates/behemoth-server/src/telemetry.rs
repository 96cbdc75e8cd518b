//! Logging and metrics initialization.

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use behemoth_config::ObservabilityConfig;
use behemoth_core::{BehemothError, BehemothResult};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `observability.log_level`.
pub fn init_logging(config: &ObservabilityConfig) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=debug", config.log_level)));

    let (json, pretty) = if config.json_logs() {
        (Some(fmt::layer().json().with_target(true)), None)
    } else {
        (None, Some(fmt::layer().with_target(true)))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .init();
}

/// Installs the Prometheus recorder and describes the profile metrics.
pub fn init_metrics() -> BehemothResult<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        BehemothError::Configuration(format!("Failed to install metrics recorder: {}", e))
    })?;

    behemoth_service::register_metrics();
    info!("Metrics system initialized");
    Ok(handle)
}

/// Router exposing the Prometheus text format under `path`.
pub fn metrics_router(path: &str, handle: PrometheusHandle) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(handle)
}

async fn metrics_handler(State(prometheus): State<PrometheusHandle>) -> impl IntoResponse {
    prometheus.render()
}
