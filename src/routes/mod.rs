//! Route definitions for the admin dashboard.

pub mod coupons;
pub mod dashboard;
pub mod gifts;
pub mod health;
pub mod keys;
pub mod payments;
pub mod referrals;
pub mod servers;
pub mod tariffs;
pub mod users;

use axum::routing::{delete, get, patch};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(dashboard::index))
        .route("/health/live", get(health::live))
        .route("/dashboard", get(dashboard::page))
        .route("/dashboard/stats", get(dashboard::stats))
        .route("/users", get(users::page))
        .route(
            "/users/{tg_id}",
            get(users::detail).patch(users::update).delete(users::remove),
        )
        .route("/payments", get(payments::page))
        .route("/keys", get(keys::page))
        .route("/keys/edit/by_email/{email}", patch(keys::update_by_email))
        .route("/keys/by_email/{email}", delete(keys::remove_by_email))
        .route("/referrals", get(referrals::page))
        .route("/referrals/one", delete(referrals::remove_one))
        .route("/servers", get(servers::page).post(servers::create))
        .route(
            "/servers/{server_name}",
            patch(servers::update).delete(servers::remove),
        )
        .route("/tariffs", get(tariffs::page).post(tariffs::create))
        .route(
            "/tariffs/{name}",
            patch(tariffs::update).delete(tariffs::remove),
        )
        .route("/coupons", get(coupons::page).post(coupons::create))
        .route(
            "/coupons/{code}",
            patch(coupons::update).delete(coupons::remove),
        )
        .route("/gifts", get(gifts::page).post(gifts::create))
        .route(
            "/gifts/{gift_id}",
            patch(gifts::update).delete(gifts::remove),
        )
        .nest_service("/static", static_files)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
