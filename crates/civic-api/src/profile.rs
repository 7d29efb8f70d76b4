use axum::{Extension, extract::State};
use tracing::info;

use civic_core::profile::validate_profile;
use civic_core::stats::profile_stats;
use civic_db::models::{ProfileUpdate, UserRow};
use civic_types::api::{Notice, ProfileResponse, ProfileUpdateResponse, UpdateProfileRequest};
use civic_types::models::Report;

use crate::convert::{report_from_row, user_from_row};
use crate::error::{ApiError, Result};
use crate::extract::Json;
use crate::middleware::Viewer;
use crate::state::{AppState, with_db};

/// GET /profile: the viewer's record and activity statistics.
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Result<Json<ProfileResponse>> {
    let vid = viewer.id.to_string();
    let (user, rows) = with_db(&state, move |db| {
        let user = db.get_user(&vid)?;
        let rows = db.get_reports_by_user(&vid, &vid)?;
        Ok((user, rows))
    })
    .await?;

    let user = user.ok_or(ApiError::NotFound)?;
    let reports: Vec<Report> = rows.iter().map(report_from_row).collect();

    Ok(Json(ProfileResponse {
        user: user_from_row(user),
        stats: profile_stats(&reports),
    }))
}

/// PUT /profile: replace the editable profile fields.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileUpdateResponse>> {
    let changes = validate_profile(&req).map_err(ApiError::Validation)?;

    let vid = viewer.id.to_string();
    let (outcome, user) = with_db(&state, move |db| {
        let Some(current) = db.get_user(&vid)? else {
            return Ok((ProfileUpdate::NotFound, None));
        };
        let updated = UserRow {
            email: changes.email,
            name: changes.name,
            phone: changes.phone,
            address: changes.address,
            avatar: changes.avatar,
            ..current
        };
        let outcome = db.update_user(&updated)?;
        Ok((outcome, Some(updated)))
    })
    .await?;

    match (outcome, user) {
        (ProfileUpdate::Updated, Some(user)) => {
            info!("Profile updated for {}", viewer.id);
            Ok(Json(ProfileUpdateResponse {
                user: user_from_row(user),
                notice: Notice::new(
                    "Profile updated",
                    "Your profile information has been saved successfully.",
                ),
            }))
        }
        (ProfileUpdate::EmailTaken, _) => Err(ApiError::Conflict(
            "email address is already in use".to_string(),
        )),
        _ => Err(ApiError::NotFound),
    }
}
