//! User list, user detail and user mutations.

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

/// GET /users
pub async fn page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let users = state.upstream.fetch_list("/users/", "users").await;
    state.views.render(
        "users.html",
        context! {
            total_users => users.len(),
            users => users,
            admin_tg_id => &state.config.admin_tg_id,
        },
    )
}

/// GET /users/{tg_id}: profile with payments, subscriptions, gifts and referrals.
///
/// Responds with a plain-text 404 when the user record cannot be loaded.
pub async fn detail(
    State(state): State<AppState>,
    Path(tg_id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let client = &state.upstream;

    let Some(mut user) = client.fetch_record(&format!("/users/{tg_id}"), "user").await else {
        return Err(AppError::NotFound("User not found".to_string()));
    };
    presentation::annotate_user(&mut user);

    let payments = client
        .fetch_list(&format!("/payments/by_tg_id/{tg_id}"), "payments")
        .await;
    let subscriptions = client
        .fetch_list(&format!("/keys/all/{tg_id}"), "subscriptions")
        .await;
    let gifts = client
        .fetch_list(&format!("/gifts/by_tg_id/{tg_id}"), "gifts")
        .await;
    let referrals = client
        .fetch_list(&format!("/referrals/all/{tg_id}"), "referrals")
        .await;

    state.views.render(
        "user_detail.html",
        context! {
            user => user,
            payments => payments,
            subscriptions => subscriptions,
            gifts => gifts,
            referrals => referrals,
            admin_tg_id => &state.config.admin_tg_id,
        },
    )
}

/// PATCH /users/{tg_id}
pub async fn update(
    State(state): State<AppState>,
    Path(tg_id): Path<i64>,
    JsonObject(body): JsonObject,
) -> ProxyResult {
    proxy::forward(
        &state.upstream,
        Method::PATCH,
        &format!("/users/{tg_id}"),
        &[],
        Some(&Value::Object(body)),
    )
    .await
}

/// DELETE /users/{tg_id}
pub async fn remove(State(state): State<AppState>, Path(tg_id): Path<i64>) -> ProxyResult {
    proxy::forward(
        &state.upstream,
        Method::DELETE,
        &format!("/users/{tg_id}"),
        &[],
        None,
    )
    .await
}
