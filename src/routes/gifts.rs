//! Gifts page and gift mutations.

use axum::{
    extract::{Path, State},
    response::Html,
};
use chrono::Utc;
use minijinja::context;
use reqwest::Method;
use serde_json::Value;

use crate::errors::AppError;
use crate::middleware::json_object::JsonObject;
use crate::services::gifts;
use crate::services::presentation;
use crate::services::proxy::{self, ProxyResult};
use crate::AppState;

/// GET /gifts: gift list plus tariffs for the creation form.
pub async fn page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let mut gift_list = state.upstream.fetch_list("/gifts/", "gifts").await;
    presentation::annotate_gifts(&mut gift_list);
    let tariffs = state.upstream.fetch_list("/tariffs/", "tariffs").await;

    state.views.render(
        "gifts.html",
        context! {
            total_gifts => gift_list.len(),
            gifts => gift_list,
            tariffs => tariffs,
            admin_tg_id => &state.config.admin_tg_id,
        },
    )
}

/// POST /gifts: `expiry_time` is normalised before forwarding.
pub async fn create(
    State(state): State<AppState>,
    JsonObject(mut body): JsonObject,
) -> ProxyResult {
    gifts::normalize_expiry(&mut body, Utc::now().naive_utc())?;
    proxy::forward(
        &state.upstream,
        Method::POST,
        "/gifts/",
        &[],
        Some(&Value::Object(body)),
    )
    .await
}

/// PATCH /gifts/{gift_id}
pub async fn update(
    State(state): State<AppState>,
    Path(gift_id): Path<String>,
    JsonObject(body): JsonObject,
) -> ProxyResult {
    proxy::forward(
        &state.upstream,
        Method::PATCH,
        &proxy::item_path("/gifts", &gift_id)?,
        &[],
        Some(&Value::Object(body)),
    )
    .await
}

/// DELETE /gifts/{gift_id}
pub async fn remove(State(state): State<AppState>, Path(gift_id): Path<String>) -> ProxyResult {
    proxy::forward(
        &state.upstream,
        Method::DELETE,
        &proxy::item_path("/gifts", &gift_id)?,
        &[],
        None,
    )
    .await
}
