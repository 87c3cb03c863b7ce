use sea_orm::{entity::prelude::*, DatabaseConnection, IdenStatic, Iterable, Set};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cafe")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Column name to stored value, one entry per table column.
    pub fn to_document(&self) -> Map<String, JsonValue> {
        Column::iter()
            .map(|col| (col.as_str().to_owned(), self.column_value(col)))
            .collect()
    }

    /// Re-hydrate a row from a document produced by [`Model::to_document`].
    pub fn from_document(doc: Map<String, JsonValue>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(JsonValue::Object(doc))
    }

    fn column_value(&self, col: Column) -> JsonValue {
        match col {
            Column::Id => json!(self.id),
            Column::Name => json!(self.name),
            Column::MapUrl => json!(self.map_url),
            Column::ImgUrl => json!(self.img_url),
            Column::Location => json!(self.location),
            Column::Seats => json!(self.seats),
            Column::HasToilet => json!(self.has_toilet),
            Column::HasWifi => json!(self.has_wifi),
            Column::HasSockets => json!(self.has_sockets),
            Column::CanTakeCalls => json!(self.can_take_calls),
            Column::CoffeePrice => json!(self.coffee_price),
        }
    }
}

/// Keys a submitted cafe must carry, in form order.
pub const REQUIRED_FIELDS: [&str; 10] = [
    "name",
    "map_url",
    "img_url",
    "location",
    "seats",
    "has_toilet",
    "has_wifi",
    "has_sockets",
    "can_take_calls",
    "coffee_price",
];

/// Coerce an untyped flag: `"true"` in any ASCII case is true, any other
/// string is false, a native boolean passes through. Other JSON types have
/// no boolean reading and yield `None`.
pub fn coerce_bool(value: &JsonValue) -> Option<bool> {
    match value {
        JsonValue::String(s) => Some(s.eq_ignore_ascii_case("true")),
        JsonValue::Bool(b) => Some(*b),
        _ => None,
    }
}

/// Validated input for a cafe that does not exist yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCafe {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

impl NewCafe {
    /// Build from submitted key/value pairs. Every key in [`REQUIRED_FIELDS`]
    /// must be present; all missing keys are reported together.
    pub fn from_fields(fields: &Map<String, JsonValue>) -> Result<Self, errors::ModelError> {
        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|key| !fields.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(errors::ModelError::Validation(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            name: text_field(fields, "name")?,
            map_url: text_field(fields, "map_url")?,
            img_url: text_field(fields, "img_url")?,
            location: text_field(fields, "location")?,
            seats: text_field(fields, "seats")?,
            has_toilet: flag_field(fields, "has_toilet")?,
            has_wifi: flag_field(fields, "has_wifi")?,
            has_sockets: flag_field(fields, "has_sockets")?,
            can_take_calls: flag_field(fields, "can_take_calls")?,
            coffee_price: optional_text_field(fields, "coffee_price")?,
        })
    }
}

fn text_field(fields: &Map<String, JsonValue>, key: &str) -> Result<String, errors::ModelError> {
    match fields.get(key) {
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(_) => Err(errors::ModelError::Validation(format!("{key} must be a string"))),
        None => Err(errors::ModelError::Validation(format!("missing required field(s): {key}"))),
    }
}

fn optional_text_field(fields: &Map<String, JsonValue>, key: &str) -> Result<Option<String>, errors::ModelError> {
    match fields.get(key) {
        Some(JsonValue::Null) | None => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(errors::ModelError::Validation(format!("{key} must be a string or null"))),
    }
}

fn flag_field(fields: &Map<String, JsonValue>, key: &str) -> Result<bool, errors::ModelError> {
    let value = fields
        .get(key)
        .ok_or_else(|| errors::ModelError::Validation(format!("missing required field(s): {key}")))?;
    coerce_bool(value).ok_or_else(|| errors::ModelError::Validation(format!("{key} must be a boolean or \"true\"/\"false\"")))
}

/// Insert a new cafe; the id is assigned by the database.
/// A duplicate name surfaces as [`errors::ModelError::Conflict`].
pub async fn create(db: &DatabaseConnection, input: NewCafe) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        name: Set(input.name),
        map_url: Set(input.map_url),
        img_url: Set(input.img_url),
        location: Set(input.location),
        seats: Set(input.seats),
        has_toilet: Set(input.has_toilet),
        has_wifi: Set(input.has_wifi),
        has_sockets: Set(input.has_sockets),
        can_take_calls: Set(input.can_take_calls),
        coffee_price: Set(input.coffee_price),
        ..Default::default()
    };
    am.insert(db).await.map_err(errors::ModelError::from)
}
