//! Subscription keys page and key mutations addressed by client email.

use axum::{
    extract::{Path, State},
    response::Html,
};
use minijinja::context;
use reqwest::Method;
use serde_json::Value;

use crate::errors::AppError;
use crate::middleware::json_object::JsonObject;
use crate::services::presentation;
use crate::services::proxy::{self, ProxyResult};
use crate::AppState;

/// GET /keys
pub async fn page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let mut keys = state.upstream.fetch_list("/keys/", "keys").await;
    presentation::annotate_keys(&mut keys);
    state.views.render(
        "keys.html",
        context! {
            total_keys => keys.len(),
            keys => keys,
            admin_tg_id => &state.config.admin_tg_id,
        },
    )
}

/// PATCH /keys/edit/by_email/{email}
pub async fn update_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
    JsonObject(body): JsonObject,
) -> ProxyResult {
    proxy::forward(
        &state.upstream,
        Method::PATCH,
        &proxy::item_path("/keys/edit/by_email", &email)?,
        &[],
        Some(&Value::Object(body)),
    )
    .await
}

/// DELETE /keys/by_email/{email}
pub async fn remove_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ProxyResult {
    proxy::forward(
        &state.upstream,
        Method::DELETE,
        &proxy::item_path("/keys/by_email", &email)?,
        &[],
        None,
    )
    .await
}
