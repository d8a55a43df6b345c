//! Referrals page and single-link removal.

use axum::{
    extract::{Query, State},
    response::Html,
};
use minijinja::context;
use reqwest::Method;

use crate::errors::AppError;
use crate::models::referral::ReferralPair;
use crate::services::proxy::{self, ProxyResult};
use crate::AppState;

/// GET /referrals
pub async fn page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let referrals = state.upstream.fetch_list("/referrals/", "referrals").await;
    state.views.render(
        "referrals.html",
        context! {
            total_referrals => referrals.len(),
            referrals => referrals,
            admin_tg_id => &state.config.admin_tg_id,
        },
    )
}

/// DELETE /referrals/one?referrer_tg_id=..&referred_tg_id=..
pub async fn remove_one(
    State(state): State<AppState>,
    Query(pair): Query<ReferralPair>,
) -> ProxyResult {
    proxy::forward(
        &state.upstream,
        Method::DELETE,
        "/referrals/one",
        &pair.to_query(),
        None,
    )
    .await
}
