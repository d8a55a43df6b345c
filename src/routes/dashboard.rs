//! Dashboard routes: aggregated statistics for the overview page.

use axum::{
    extract::State,
    response::{Html, Redirect},
    Json,
};
use minijinja::context;

use crate::errors::AppError;
use crate::services::dashboard::{self, DashboardStats};
use crate::AppState;

/// GET /: the dashboard is the landing page.
pub async fn index() -> Redirect {
    Redirect::to("/dashboard")
}

/// GET /dashboard: overview page.
pub async fn page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let stats = dashboard::get_stats(&state.upstream).await;
    state.views.render(
        "dashboard.html",
        context! {
            stats => stats,
            admin_tg_id => &state.config.admin_tg_id,
        },
    )
}

/// GET /dashboard/stats: the same statistics as JSON.
pub async fn stats(State(state): State<AppState>) -> Json<DashboardStats> {
    Json(dashboard::get_stats(&state.upstream).await)
}
