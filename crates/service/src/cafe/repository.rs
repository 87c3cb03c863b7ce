use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::cafe::{Model as Cafe, NewCafe};

use crate::errors::ServiceError;

/// Persistence operations the cafe service needs.
#[async_trait]
pub trait CafeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Cafe>, ServiceError>;
    async fn list_at(&self, location: &str) -> Result<Vec<Cafe>, ServiceError>;
    async fn create(&self, input: NewCafe) -> Result<Cafe, ServiceError>;
    async fn set_coffee_price(&self, id: i32, coffee_price: Option<String>) -> Result<Option<Cafe>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmCafeRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CafeRepository for SeaOrmCafeRepository {
    async fn list(&self) -> Result<Vec<Cafe>, ServiceError> {
        crate::db::cafe_store::list_cafes(&self.db).await
    }

    async fn list_at(&self, location: &str) -> Result<Vec<Cafe>, ServiceError> {
        crate::db::cafe_store::list_cafes_at(&self.db, location).await
    }

    async fn create(&self, input: NewCafe) -> Result<Cafe, ServiceError> {
        crate::db::cafe_store::create_cafe(&self.db, input).await
    }

    async fn set_coffee_price(&self, id: i32, coffee_price: Option<String>) -> Result<Option<Cafe>, ServiceError> {
        crate::db::cafe_store::update_coffee_price(&self.db, id, coffee_price).await
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        crate::db::cafe_store::delete_cafe(&self.db, id).await
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockCafeRepository {
        rows: Mutex<BTreeMap<i32, Cafe>>, // key: id
        last_id: Mutex<i32>,
    }

    impl MockCafeRepository {
        pub async fn row_count(&self) -> usize {
            self.rows.lock().await.len()
        }
    }

    #[async_trait]
    impl CafeRepository for MockCafeRepository {
        async fn list(&self) -> Result<Vec<Cafe>, ServiceError> {
            Ok(self.rows.lock().await.values().cloned().collect())
        }

        async fn list_at(&self, location: &str) -> Result<Vec<Cafe>, ServiceError> {
            let rows = self.rows.lock().await;
            Ok(rows.values().filter(|c| c.location == location).cloned().collect())
        }

        async fn create(&self, input: NewCafe) -> Result<Cafe, ServiceError> {
            let mut rows = self.rows.lock().await;
            if rows.values().any(|c| c.name == input.name) {
                return Err(ServiceError::Conflict(format!("cafe.name {}", input.name)));
            }
            let mut last_id = self.last_id.lock().await;
            *last_id += 1;
            let cafe = Cafe {
                id: *last_id,
                name: input.name,
                map_url: input.map_url,
                img_url: input.img_url,
                location: input.location,
                seats: input.seats,
                has_toilet: input.has_toilet,
                has_wifi: input.has_wifi,
                has_sockets: input.has_sockets,
                can_take_calls: input.can_take_calls,
                coffee_price: input.coffee_price,
            };
            rows.insert(cafe.id, cafe.clone());
            Ok(cafe)
        }

        async fn set_coffee_price(&self, id: i32, coffee_price: Option<String>) -> Result<Option<Cafe>, ServiceError> {
            let mut rows = self.rows.lock().await;
            Ok(rows.get_mut(&id).map(|c| {
                c.coffee_price = coffee_price;
                c.clone()
            }))
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.rows.lock().await.remove(&id).is_some())
        }
    }
}
