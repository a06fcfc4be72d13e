use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/accounts", get(handlers::list_accounts).post(handlers::add_or_renew))
        .route("/api/accounts/remove", post(handlers::remove_account))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/chart", get(handlers::get_chart))
        .route("/api/audit", get(handlers::get_audit))
        .route("/api/login", post(handlers::login))
        .with_state(state)
}
