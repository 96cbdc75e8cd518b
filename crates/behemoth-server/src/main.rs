//! # Behemoth Server
//!
//! Entry point of the profile service.

use behemoth_config::{AppConfig, ConfigLoader};
use behemoth_core::{BehemothError, BehemothResult};
use behemoth_rest::create_router;
use behemoth_server::{
    di::{build_app_state, build_profile_module},
    infra::Infrastructure,
    startup::{print_banner, print_startup_info},
    telemetry::{init_logging, init_metrics, metrics_router},
};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.get().await,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);
    print_banner();
    info!("Starting Behemoth profile server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> BehemothResult<()> {
    let metrics = if config.observability.metrics_enabled {
        Some(init_metrics()?)
    } else {
        None
    };

    let infra = Infrastructure::initialize(&config).await?;
    let module = build_profile_module(&infra, &config);
    let state = build_app_state(&module, &infra, &config);

    let blob_root = infra.blobs.root_dir().to_path_buf();
    let mut router = create_router(state, &config.server, Some(blob_root));
    if let Some(handle) = metrics {
        router = router.merge(metrics_router(&config.observability.metrics_path, handle));
    }

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| BehemothError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    print_startup_info(&config);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| BehemothError::Internal(format!("REST server error: {}", e)))?;

    infra.shutdown().await;
    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
