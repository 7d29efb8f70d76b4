pub mod community;
pub mod convert;
pub mod dashboard;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod navigation;
pub mod profile;
pub mod reports;
pub mod state;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
};

use crate::middleware::require_viewer;
use crate::state::AppState;

/// All routes, with the viewer check applied to everything except the
/// static shell endpoints.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(navigation::health))
        .route("/categories", get(navigation::categories))
        .route("/navigation", get(navigation::get_navigation));

    let protected_routes = Router::new()
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/reports", get(reports::list_reports).post(reports::create_report))
        .route("/reports/{report_id}", get(reports::get_report))
        .route("/reports/{report_id}/status", patch(reports::update_status))
        .route("/community", get(community::get_feed))
        .route("/community/{report_id}/upvote", post(community::toggle_upvote))
        .route("/profile", get(profile::get_profile).put(profile::update_profile))
        .route_layer(from_fn_with_state(state.clone(), require_viewer));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}

#[cfg(test)]
mod tests;
