use sea_orm::{sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use models::cafe::{self, Entity as CafeEntity, NewCafe};
use crate::errors::ServiceError;

/// Every cafe, in the order the database returns them.
pub async fn list_cafes(db: &DatabaseConnection) -> Result<Vec<cafe::Model>, ServiceError> {
    CafeEntity::find().all(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Cafes whose `location` equals `location` exactly (case-sensitive, untrimmed).
pub async fn list_cafes_at(db: &DatabaseConnection, location: &str) -> Result<Vec<cafe::Model>, ServiceError> {
    CafeEntity::find()
        .filter(cafe::Column::Location.eq(location))
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn get_cafe(db: &DatabaseConnection, id: i32) -> Result<Option<cafe::Model>, ServiceError> {
    CafeEntity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Insert a validated cafe; duplicate names map to [`ServiceError::Conflict`].
pub async fn create_cafe(db: &DatabaseConnection, input: NewCafe) -> Result<cafe::Model, ServiceError> {
    Ok(cafe::create(db, input).await?)
}

/// Overwrite only `coffee_price` in one statement. `Ok(None)` when no row has that id.
pub async fn update_coffee_price(
    db: &DatabaseConnection,
    id: i32,
    coffee_price: Option<String>,
) -> Result<Option<cafe::Model>, ServiceError> {
    let res = CafeEntity::update_many()
        .col_expr(cafe::Column::CoffeePrice, Expr::value(coffee_price))
        .filter(cafe::Column::Id.eq(id))
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Ok(None);
    }
    // a delete may land between the update and this read
    get_cafe(db, id).await
}

/// Delete a cafe; returns true if a row was removed.
pub async fn delete_cafe(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = CafeEntity::delete_by_id(id).exec(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
