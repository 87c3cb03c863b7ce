use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;

pub use configs::DatabaseConfig;

/// Connect with the pool settings from `[database]`.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    tracing::info!(max_connections = cfg.max_connections, "connecting to database");
    let db = Database::connect(opts).await?;
    Ok(db)
}

/// Private in-memory SQLite database. The pool is pinned to one connection
/// because every SQLite memory connection opens its own empty database.
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(opts).await?;
    Ok(db)
}

/// Connect in memory and apply all migrations.
pub async fn connect_in_memory_migrated() -> anyhow::Result<DatabaseConnection> {
    use migration::MigratorTrait;

    let db = connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
