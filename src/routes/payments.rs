//! Payments page.

use axum::{extract::State, response::Html};
use minijinja::context;

use crate::errors::AppError;
use crate::AppState;

/// GET /payments
pub async fn page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let payments = state.upstream.fetch_list("/payments/", "payments").await;
    state.views.render(
        "payments.html",
        context! {
            total_payments => payments.len(),
            payments => payments,
            admin_tg_id => &state.config.admin_tg_id,
        },
    )
}
