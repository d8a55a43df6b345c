//! JSON object body extractor for mutation handlers.

use axum::{
    extract::{FromRequest, Request},
    Json,
};

use crate::errors::AppError;
use crate::models::record::Record;

/// Request body that must be a JSON object. Anything else is rejected with
/// a 400 `{"error": ...}` body before the upstream is contacted.
///
/// ```ignore
/// async fn handler(JsonObject(body): JsonObject) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct JsonObject(pub Record);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Record>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(JsonObject(body))
    }
}
