use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde_json::{Map, Value};

use crate::errors::JsonApiError;

/// Submitted cafe fields from a urlencoded or multipart form (all values
/// strings) or a JSON object (values keep their JSON type).
#[derive(Debug)]
pub struct CafeFields(pub Map<String, Value>);

enum BodyKind {
    Json,
    Multipart,
    UrlEncoded,
}

fn body_kind(req: &Request) -> BodyKind {
    let mime = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.parse::<mime::Mime>().ok());
    match mime {
        Some(m) if m.type_() == mime::APPLICATION && (m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON)) => {
            BodyKind::Json
        }
        Some(m) if m.essence_str() == mime::MULTIPART_FORM_DATA.essence_str() => BodyKind::Multipart,
        _ => BodyKind::UrlEncoded,
    }
}

#[async_trait]
impl<S> FromRequest<S> for CafeFields
where
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(&req) {
            BodyKind::Json => {
                let Json(fields) = Json::<Map<String, Value>>::from_request(req, state)
                    .await
                    .map_err(|e| JsonApiError::bad_request(e.body_text()))?;
                Ok(Self(fields))
            }
            BodyKind::Multipart => {
                let mut multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| JsonApiError::bad_request(e.body_text()))?;
                let mut fields = Map::new();
                while let Some(field) = multipart
                    .next_field()
                    .await
                    .map_err(|e| JsonApiError::bad_request(e.body_text()))?
                {
                    let Some(name) = field.name().map(str::to_owned) else { continue };
                    let text = field
                        .text()
                        .await
                        .map_err(|e| JsonApiError::bad_request(e.body_text()))?;
                    fields.insert(name, Value::String(text));
                }
                Ok(Self(fields))
            }
            BodyKind::UrlEncoded => {
                let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                    .await
                    .map_err(|e| JsonApiError::bad_request(e.body_text()))?;
                Ok(Self(fields.into_iter().map(|(k, v)| (k, Value::String(v))).collect()))
            }
        }
    }
}
