use std::sync::Arc;

use rand::seq::SliceRandom;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use models::cafe::{Model as Cafe, NewCafe};

use crate::cafe::repository::CafeRepository;
use crate::errors::ServiceError;

pub const NO_CAFES: &str = "Sorry, there are no cafes in the database.";
pub const NO_CAFE_AT_LOCATION: &str = "Sorry, we don't have a cafe at that location.";
pub const NO_CAFE_WITH_ID: &str = "Sorry a cafe with that id was not found in the database.";
pub const BAD_API_KEY: &str = "Sorry that's not allowed. Make sure you have correct api-key";

/// Cafe service configuration
#[derive(Clone)]
pub struct CafeServiceConfig {
    /// Shared secret required by [`CafeService::report_closed`].
    pub api_key: String,
}

/// Business rules for the cafe directory, independent of web framework.
pub struct CafeService<R: CafeRepository> {
    repo: Arc<R>,
    cfg: CafeServiceConfig,
}

impl<R: CafeRepository> CafeService<R> {
    pub fn new(repo: Arc<R>, cfg: CafeServiceConfig) -> Self { Self { repo, cfg } }

    /// One cafe chosen uniformly at random from the whole table.
    ///
    /// # Examples
    /// ```
    /// use service::cafe::{repository::mock::MockCafeRepository, service::{CafeService, CafeServiceConfig}};
    /// use service::errors::ServiceError;
    /// use std::sync::Arc;
    /// let svc = CafeService::new(Arc::new(MockCafeRepository::default()), CafeServiceConfig { api_key: "k".into() });
    /// let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    /// let err = rt.block_on(svc.random()).unwrap_err();
    /// assert!(matches!(err, ServiceError::EmptyCollection(_)));
    /// ```
    #[instrument(skip(self))]
    pub async fn random(&self) -> Result<Cafe, ServiceError> {
        let cafes = self.repo.list().await?;
        debug!(candidates = cafes.len(), "random_pick");
        pick_uniform(&cafes).ok_or_else(|| ServiceError::EmptyCollection(NO_CAFES.into()))
    }

    pub async fn all(&self) -> Result<Vec<Cafe>, ServiceError> {
        self.repo.list().await
    }

    /// Cafes at exactly `location`. No location, or no match, is `NotFound`.
    #[instrument(skip(self))]
    pub async fn search(&self, location: Option<&str>) -> Result<Vec<Cafe>, ServiceError> {
        let Some(location) = location else {
            return Err(ServiceError::NotFound(NO_CAFE_AT_LOCATION.into()));
        };
        let cafes = self.repo.list_at(location).await?;
        if cafes.is_empty() {
            return Err(ServiceError::NotFound(NO_CAFE_AT_LOCATION.into()));
        }
        Ok(cafes)
    }

    /// Validate submitted fields and persist a new cafe.
    #[instrument(skip(self, fields))]
    pub async fn add(&self, fields: &Map<String, Value>) -> Result<Cafe, ServiceError> {
        let input = NewCafe::from_fields(fields)?;
        let name = input.name.clone();
        let created = self.repo.create(input).await.map_err(|e| match e {
            ServiceError::Conflict(_) => {
                ServiceError::Conflict(format!("Sorry, a cafe named '{name}' already exists."))
            }
            other => other,
        })?;
        info!(cafe_id = created.id, name = %created.name, "cafe_added");
        Ok(created)
    }

    /// Replace the coffee price of one cafe; every other column is left untouched.
    /// Identifiers that are not integers match no row.
    #[instrument(skip(self))]
    pub async fn update_price(&self, cafe_id: &str, new_price: Option<String>) -> Result<Cafe, ServiceError> {
        let id = parse_id(cafe_id).ok_or_else(|| ServiceError::NotFound(NO_CAFE_WITH_ID.into()))?;
        let updated = self
            .repo
            .set_coffee_price(id, new_price)
            .await?
            .ok_or_else(|| ServiceError::NotFound(NO_CAFE_WITH_ID.into()))?;
        info!(cafe_id = updated.id, "cafe_price_updated");
        Ok(updated)
    }

    /// Delete a cafe reported as closed. The key is checked before the row is
    /// looked up, so a wrong key never reveals whether the id exists.
    #[instrument(skip(self, api_key))]
    pub async fn report_closed(&self, cafe_id: &str, api_key: Option<&str>) -> Result<(), ServiceError> {
        if !api_key.is_some_and(|key| keys_match(&self.cfg.api_key, key)) {
            warn!(%cafe_id, "report_closed_rejected");
            return Err(ServiceError::Forbidden(BAD_API_KEY.into()));
        }
        let id = parse_id(cafe_id).ok_or_else(|| ServiceError::NotFound(NO_CAFE_WITH_ID.into()))?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::NotFound(NO_CAFE_WITH_ID.into()));
        }
        info!(cafe_id = id, "cafe_deleted");
        Ok(())
    }
}

fn parse_id(raw: &str) -> Option<i32> {
    raw.parse().ok()
}

fn pick_uniform<T: Clone>(items: &[T]) -> Option<T> {
    items.choose(&mut rand::thread_rng()).cloned()
}

/// Byte comparison whose running time depends only on the lengths.
fn keys_match(expected: &str, given: &str) -> bool {
    let (a, b) = (expected.as_bytes(), given.as_bytes());
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
