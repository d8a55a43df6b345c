//! Coupons page and coupon mutations addressed by coupon code.

use axum::{
    extract::{Path, State},
    response::Html,
};
use minijinja::context;
use reqwest::Method;
use serde_json::Value;

use crate::errors::AppError;
use crate::middleware::json_object::JsonObject;
use crate::services::proxy::{self, ProxyResult};
use crate::AppState;

/// GET /coupons
pub async fn page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let coupons = state.upstream.fetch_list("/coupons/", "coupons").await;
    state.views.render(
        "coupons.html",
        context! {
            total_coupons => coupons.len(),
            coupons => coupons,
            admin_tg_id => &state.config.admin_tg_id,
        },
    )
}

/// POST /coupons
pub async fn create(State(state): State<AppState>, JsonObject(body): JsonObject) -> ProxyResult {
    proxy::forward(
        &state.upstream,
        Method::POST,
        "/coupons/",
        &[],
        Some(&Value::Object(body)),
    )
    .await
}

/// PATCH /coupons/{code}
pub async fn update(
    State(state): State<AppState>,
    Path(code): Path<String>,
    JsonObject(body): JsonObject,
) -> ProxyResult {
    proxy::forward(
        &state.upstream,
        Method::PATCH,
        &proxy::item_path("/coupons", &code)?,
        &[],
        Some(&Value::Object(body)),
    )
    .await
}

/// DELETE /coupons/{code}
pub async fn remove(State(state): State<AppState>, Path(code): Path<String>) -> ProxyResult {
    proxy::forward(
        &state.upstream,
        Method::DELETE,
        &proxy::item_path("/coupons", &code)?,
        &[],
        None,
    )
    .await
}
