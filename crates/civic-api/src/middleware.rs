use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use civic_types::api::VIEWER_HEADER;

use crate::error::ApiError;
use crate::state::{AppState, with_db};

/// The resolved user a request acts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub id: Uuid,
}

/// Resolve the viewer from the `X-User-Id` header and make sure they exist.
pub async fn require_viewer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let viewer_id = req
        .headers()
        .get(VIEWER_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<Uuid>().ok())
        .ok_or(ApiError::Unauthorized)?;

    let uid = viewer_id.to_string();
    if !with_db(&state, move |db| db.user_exists(&uid)).await? {
        return Err(ApiError::Unauthorized);
    }

    req.extensions_mut().insert(Viewer { id: viewer_id });
    Ok(next.run(req).await)
}
