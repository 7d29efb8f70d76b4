use serde_json::{Value, json};

use civic_core::nav::sidebar;
use civic_core::submission::CATEGORIES;
use civic_types::api::{NavigationQuery, NavigationResponse};

use crate::extract::{Json, Query};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /categories: the fixed set a report's category is chosen from.
pub async fn categories() -> Json<&'static [&'static str]> {
    Json(CATEGORIES)
}

/// GET /navigation: sidebar sections for the current path and mode.
pub async fn get_navigation(Query(query): Query<NavigationQuery>) -> Json<NavigationResponse> {
    Json(sidebar(query.mode, query.path.as_deref()))
}
