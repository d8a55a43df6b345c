//! Tariffs page and tariff mutations addressed by tariff name.

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

/// GET /tariffs
pub async fn page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let mut tariffs = state.upstream.fetch_list("/tariffs/", "tariffs").await;
    presentation::fill_subgroup_titles(&mut tariffs);
    state.views.render(
        "tariffs.html",
        context! {
            total_tariffs => tariffs.len(),
            tariffs => tariffs,
            admin_tg_id => &state.config.admin_tg_id,
        },
    )
}

/// POST /tariffs
pub async fn create(State(state): State<AppState>, JsonObject(body): JsonObject) -> ProxyResult {
    proxy::forward(
        &state.upstream,
        Method::POST,
        "/tariffs/",
        &[],
        Some(&Value::Object(body)),
    )
    .await
}

/// PATCH /tariffs/{name}
pub async fn update(
    State(state): State<AppState>,
    Path(name): Path<String>,
    JsonObject(body): JsonObject,
) -> ProxyResult {
    proxy::forward(
        &state.upstream,
        Method::PATCH,
        &proxy::item_path("/tariffs", &name)?,
        &[],
        Some(&Value::Object(body)),
    )
    .await
}

/// DELETE /tariffs/{name}
pub async fn remove(State(state): State<AppState>, Path(name): Path<String>) -> ProxyResult {
    proxy::forward(
        &state.upstream,
        Method::DELETE,
        &proxy::item_path("/tariffs", &name)?,
        &[],
        None,
    )
    .await
}
