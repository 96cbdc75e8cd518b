//! Throwaway MySQL for the repository tests.

use behemoth_config::DatabaseConfig;
use behemoth_repository::{DatabasePool, DatabasePoolInterface, MySqlProfileRepository};
use std::sync::Arc;
use std::time::Duration;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::mysql::Mysql;

/// Starts MySQL, applies the migrations and returns a repository over it.
///
/// Keep the container binding alive for the duration of the test.
pub async fn migrated_repository() -> (ContainerAsync<Mysql>, MySqlProfileRepository) {
    let mysql = Mysql::default().start().await.expect("MySQL container did not start");
    let port = mysql.get_host_port_ipv4(3306).await.expect("MySQL port not mapped");

    let config = DatabaseConfig {
        url: format!("mysql://root@127.0.0.1:{}/test", port),
        max_connections: 2,
        ..DatabaseConfig::default()
    };

    // The server restarts once while the image initializes.
    let mut attempt = 0;
    let pool = loop {
        match DatabasePool::new(&config).await {
            Ok(pool) => break pool,
            Err(e) if attempt >= 30 => panic!("MySQL never accepted connections: {}", e),
            Err(_) => {
                attempt += 1;
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    };
    pool.run_migrations().await.expect("Migrations failed");

    (mysql, MySqlProfileRepository::new(Arc::new(pool)))
}
