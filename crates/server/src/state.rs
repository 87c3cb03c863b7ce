use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::cafe::{
    repository::SeaOrmCafeRepository,
    service::{CafeService, CafeServiceConfig},
};

/// Shared handler state: the pooled storage handle and the service built on it.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub cafes: Arc<CafeService<SeaOrmCafeRepository>>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, api_key: impl Into<String>) -> Self {
        let repo = Arc::new(SeaOrmCafeRepository { db: db.clone() });
        let cafes = Arc::new(CafeService::new(repo, CafeServiceConfig { api_key: api_key.into() }));
        Self { db, cafes }
    }
}
