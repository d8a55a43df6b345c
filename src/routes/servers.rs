//! VPN servers page and server mutations addressed by server name.

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

/// GET /servers: server list plus tariff group codes for the add form.
pub async fn page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let servers = state.upstream.fetch_list("/servers/", "servers").await;
    let tariffs = state.upstream.fetch_list("/tariffs/", "tariffs").await;
    state.views.render(
        "servers.html",
        context! {
            total_servers => servers.len(),
            servers => servers,
            group_codes => presentation::group_codes(&tariffs),
            admin_tg_id => &state.config.admin_tg_id,
        },
    )
}

/// POST /servers
pub async fn create(State(state): State<AppState>, JsonObject(body): JsonObject) -> ProxyResult {
    proxy::forward(
        &state.upstream,
        Method::POST,
        "/servers/",
        &[],
        Some(&Value::Object(body)),
    )
    .await
}

/// PATCH /servers/{server_name}
pub async fn update(
    State(state): State<AppState>,
    Path(server_name): Path<String>,
    JsonObject(body): JsonObject,
) -> ProxyResult {
    proxy::forward(
        &state.upstream,
        Method::PATCH,
        &proxy::item_path("/servers", &server_name)?,
        &[],
        Some(&Value::Object(body)),
    )
    .await
}

/// DELETE /servers/{server_name}
pub async fn remove(
    State(state): State<AppState>,
    Path(server_name): Path<String>,
) -> ProxyResult {
    proxy::forward(
        &state.upstream,
        Method::DELETE,
        &proxy::item_path("/servers", &server_name)?,
        &[],
        None,
    )
    .await
}
