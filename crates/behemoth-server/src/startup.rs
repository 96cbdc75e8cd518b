//! Server startup utilities.

use behemoth_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    ____       __                         __  __
   / __ )___  / /_  ___  ____ ___  ____  / /_/ /_
  / __  / _ \/ __ \/ _ \/ __ `__ \/ __ \/ __/ __ \
 / /_/ /  __/ / / /  __/ / / / / / /_/ / /_/ / / /
/_____/\___/_/ /_/\___/_/ /_/ /_/\____/\__/_/ /_/

                       Profiles
    "#);
}

/// Returns the lines describing where the server can be reached.
pub fn startup_info(config: &AppConfig) -> Vec<String> {
    let base = format!("http://{}", config.server.addr());
    let mut lines = vec![
        format!("REST API:  {}/profiles/me", base),
        format!("Health:    {}/health", base),
        format!("API Docs:  {}/swagger-ui", base),
        format!("Avatars:   {}", config.storage.public_base_url),
    ];
    if config.observability.metrics_enabled {
        lines.push(format!("Metrics:   {}{}", base, config.observability.metrics_path));
    }
    lines
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("Environment: {}", config.app.environment);
    for line in startup_info(config) {
        info!("{}", line);
    }
    info!("{}", separator);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_banner_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_banner();
    }

    #[test]
    fn test_startup_info_lists_endpoints() {
        let config = AppConfig::default();
        let lines = startup_info(&config);

        assert!(lines[0].ends_with(":8080/profiles/me"));
        assert!(lines.iter().any(|l| l.contains("/metrics")));
    }

    #[test]
    fn test_startup_info_without_metrics() {
        let mut config = AppConfig::default();
        config.observability.metrics_enabled = false;

        assert!(!startup_info(&config).iter().any(|l| l.contains("Metrics")));
    }
}
