use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, ServerConfig};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::ServerState;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_from_env();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// config.toml first, environment variables only when the file is absent.
/// A file that exists but fails to parse or validate is an error.
pub fn load_config() -> anyhow::Result<AppConfig> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(e) if is_missing_file(&e) => {
            warn!(error = %e, "config.toml not found; falling back to environment");
            AppConfig::from_env()
        }
        Err(e) => Err(e.context("invalid configuration file")),
    }
}

fn is_missing_file(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    common::env::ensure_env("frontend").await?;

    let cfg = load_config()?;

    // DB connection + schema
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;

    let state = ServerState::new(db, cfg.auth.api_key.clone());

    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting cafe directory server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let server = ServerConfig { host: "0.0.0.0".into(), port: 5000, worker_threads: None };
        assert_eq!(bind_addr(&server).unwrap(), "0.0.0.0:5000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn bind_addr_rejects_bad_host() {
        let server = ServerConfig { host: "not a host".into(), port: 5000, worker_threads: None };
        assert!(bind_addr(&server).is_err());
    }

    // CONFIG_PATH is process-wide, so every case that sets it lives in this one test
    #[test]
    fn load_config_only_falls_back_when_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();

        let invalid = dir.path().join("invalid.toml");
        std::fs::write(
            &invalid,
            "[server]\nhost = \"127.0.0.1\"\nport = 0\n\n[auth]\napi_key = \"real-secret\"\n",
        )
        .unwrap();
        std::env::set_var("CONFIG_PATH", &invalid);
        assert!(load_config().is_err());

        let malformed = dir.path().join("malformed.toml");
        std::fs::write(&malformed, "[server\nport = ").unwrap();
        std::env::set_var("CONFIG_PATH", &malformed);
        assert!(load_config().is_err());

        let valid = dir.path().join("valid.toml");
        std::fs::write(
            &valid,
            "[server]\nhost = \"127.0.0.1\"\nport = 5001\n\n[database]\nurl = \"sqlite::memory:\"\n\n[auth]\napi_key = \"real-secret\"\n",
        )
        .unwrap();
        std::env::set_var("CONFIG_PATH", &valid);
        let cfg = load_config().unwrap();
        assert_eq!(cfg.server.port, 5001);
        assert_eq!(cfg.auth.api_key, "real-secret");

        std::env::set_var("CONFIG_PATH", dir.path().join("absent.toml"));
        assert!(load_config().is_ok());

        std::env::remove_var("CONFIG_PATH");
    }
}
