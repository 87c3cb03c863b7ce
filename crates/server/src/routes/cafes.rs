use axum::{extract::{Path, Query, State}, Json};
use common::types::SuccessResponse;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{errors::JsonApiError, extract::CafeFields, state::ServerState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Exact, case-sensitive location to match
    pub loc: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpdatePriceQuery {
    /// Free-form price; omitted clears the stored price
    pub new_price: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportClosedQuery {
    /// Shared secret authorizing the delete
    #[serde(rename = "api-key")]
    pub api_key: Option<String>,
}

#[utoipa::path(get, path = "/random", tag = "cafes", responses((status = 200, description = "One cafe picked uniformly at random", body = crate::openapi::CafeEnvelopeDoc), (status = 404, description = "No cafes stored")))]
pub async fn random_cafe(State(state): State<ServerState>) -> Result<Json<Value>, JsonApiError> {
    let cafe = state.cafes.random().await?;
    Ok(Json(json!({ "cafe": cafe.to_document() })))
}

#[utoipa::path(get, path = "/all", tag = "cafes", responses((status = 200, description = "Every cafe", body = crate::openapi::CafesEnvelopeDoc)))]
pub async fn all_cafes(State(state): State<ServerState>) -> Result<Json<Value>, JsonApiError> {
    let cafes = state.cafes.all().await?;
    let docs: Vec<_> = cafes.iter().map(|c| c.to_document()).collect();
    Ok(Json(json!({ "cafes": docs })))
}

#[utoipa::path(get, path = "/search", tag = "cafes", params(SearchQuery), responses((status = 200, description = "Cafes at the location", body = crate::openapi::CafesEnvelopeDoc), (status = 404, description = "No cafe at that location")))]
pub async fn search_cafes(
    State(state): State<ServerState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Value>, JsonApiError> {
    let cafes = state.cafes.search(q.loc.as_deref()).await?;
    let docs: Vec<_> = cafes.iter().map(|c| c.to_document()).collect();
    Ok(Json(json!({ "cafes": docs })))
}

#[utoipa::path(post, path = "/add", tag = "cafes", request_body(content = crate::openapi::AddCafeFormDoc, content_type = "application/x-www-form-urlencoded"), responses((status = 200, description = "Cafe added"), (status = 400, description = "Missing or invalid field"), (status = 409, description = "A cafe with that name exists")))]
pub async fn add_cafe(
    State(state): State<ServerState>,
    CafeFields(fields): CafeFields,
) -> Result<Json<SuccessResponse>, JsonApiError> {
    state.cafes.add(&fields).await?;
    Ok(Json(SuccessResponse::new("Successfully added the new cafe.")))
}

#[utoipa::path(patch, path = "/update-price/{cafe_id}", tag = "cafes", params(("cafe_id" = String, Path, description = "Cafe id"), UpdatePriceQuery), responses((status = 200, description = "Price updated"), (status = 404, description = "No cafe with that id")))]
pub async fn update_price(
    State(state): State<ServerState>,
    Path(cafe_id): Path<String>,
    Query(q): Query<UpdatePriceQuery>,
) -> Result<Json<SuccessResponse>, JsonApiError> {
    state.cafes.update_price(&cafe_id, q.new_price).await?;
    Ok(Json(SuccessResponse::new("Successfully updated Cafe Price.")))
}

#[utoipa::path(delete, path = "/report-closed/{cafe_id}", tag = "cafes", params(("cafe_id" = String, Path, description = "Cafe id"), ReportClosedQuery), responses((status = 200, description = "Cafe deleted"), (status = 403, description = "Wrong or missing api-key"), (status = 404, description = "No cafe with that id")))]
pub async fn report_closed(
    State(state): State<ServerState>,
    Path(cafe_id): Path<String>,
    Query(q): Query<ReportClosedQuery>,
) -> Result<Json<SuccessResponse>, JsonApiError> {
    state.cafes.report_closed(&cafe_id, q.api_key.as_deref()).await?;
    Ok(Json(SuccessResponse::new("Requested Cafe has been successfully deleted.")))
}
