use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct CafeDoc {
    pub id: i32,
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

#[derive(utoipa::ToSchema)]
pub struct CafeEnvelopeDoc { pub cafe: CafeDoc }

#[derive(utoipa::ToSchema)]
pub struct CafesEnvelopeDoc { pub cafes: Vec<CafeDoc> }

/// Boolean fields accept "true"/"false" in any case; anything else reads as false.
#[derive(utoipa::ToSchema)]
pub struct AddCafeFormDoc {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: String,
    pub has_wifi: String,
    pub has_sockets: String,
    pub can_take_calls: String,
    pub coffee_price: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::cafes::random_cafe,
        crate::routes::cafes::all_cafes,
        crate::routes::cafes::search_cafes,
        crate::routes::cafes::add_cafe,
        crate::routes::cafes::update_price,
        crate::routes::cafes::report_closed,
    ),
    components(
        schemas(
            HealthResponse,
            CafeDoc,
            CafeEnvelopeDoc,
            CafesEnvelopeDoc,
            AddCafeFormDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "cafes")
    )
)]
pub struct ApiDoc;
