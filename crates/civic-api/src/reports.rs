use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use civic_core::filter::{ReportFilter, Selector};
use civic_core::page::paginate;
use civic_core::sort::SortKey;
use civic_core::submission;
use civic_core::tabs::{in_report_tab, tab_counts};
use civic_core::workflow;
use civic_db::models::NewReportRow;
use civic_db::timestamp;
use civic_types::api::{CreateReportRequest, ReportListResponse, ReportQuery, UpdateStatusRequest};
use civic_types::models::{Report, Status};

use crate::convert::report_from_row;
use crate::error::{ApiError, Result};
use crate::extract::{Json, Path, Query};
use crate::middleware::Viewer;
use crate::state::{AppState, with_db};

/// GET /reports: the viewer's own reports after search, status filter,
/// sort and tab, plus the size of every tab.
pub async fn list_reports(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportListResponse>> {
    let status = Selector::<Status>::parse(query.status.as_deref())
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let vid = viewer.id.to_string();
    let rows = with_db(&state, move |db| db.get_reports_by_user(&vid, &vid)).await?;
    let reports: Vec<Report> = rows.iter().map(report_from_row).collect();

    let filtered = ReportFilter::by_status(query.q.as_deref(), status).apply(&reports);
    let sorted = query.sort.sorted(&filtered);
    let tabs = tab_counts(&sorted);

    let in_tab: Vec<Report> = sorted
        .into_iter()
        .filter(|r| in_report_tab(query.tab, r))
        .collect();

    Ok(Json(ReportListResponse {
        page: paginate(in_tab, query.limit, query.offset),
        tabs,
    }))
}

/// POST /reports: validate and store a new report owned by the viewer.
pub async fn create_report(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Json(req): Json<CreateReportRequest>,
) -> Result<impl IntoResponse> {
    let new_report = submission::validate(&req).map_err(ApiError::Validation)?;
    let report = new_report.into_report(Uuid::new_v4(), viewer.id, Utc::now());

    let stored = report.clone();
    with_db(&state, move |db| {
        let id = stored.id.to_string();
        let user_id = stored.user_id.to_string();
        let created_at = timestamp(stored.created_at);
        db.insert_report(&NewReportRow {
            id: &id,
            user_id: &user_id,
            title: &stored.title,
            description: &stored.description,
            category: &stored.category,
            status: stored.status.as_str(),
            priority: stored.priority.as_str(),
            lat: stored.location.lat,
            lng: stored.location.lng,
            address: &stored.location.address,
            images: &stored.images,
            created_at: &created_at,
        })
    })
    .await?;

    info!(
        "Report {} ({}, {}) submitted by {}",
        report.id, report.category, report.priority, viewer.id
    );
    Ok((StatusCode::CREATED, Json(report)))
}

/// GET /reports/{id}: any report, with the viewer's vote flag.
pub async fn get_report(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(report_id): Path<Uuid>,
) -> Result<Json<Report>> {
    let report = load_report(&state, report_id, viewer.id).await?;
    Ok(Json(report))
}

/// PATCH /reports/{id}/status: administrators move reports forward
/// through the workflow.
pub async fn update_status(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(report_id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<Report>> {
    if !state.is_admin(viewer.id) {
        return Err(ApiError::Forbidden);
    }

    let current = load_report(&state, report_id, viewer.id).await?;
    let next = workflow::transition(current.status, req.status)
        .map_err(|e| ApiError::Conflict(e.to_string()))?;

    let rid = report_id.to_string();
    let from = current.status.as_str();
    let updated_at = timestamp(Utc::now());
    let moved = with_db(&state, move |db| {
        db.set_status(&rid, from, next.as_str(), &updated_at)
    })
    .await?;
    if !moved {
        return Err(ApiError::Conflict(format!(
            "report {} is no longer {}",
            report_id, current.status
        )));
    }

    info!(
        "Report {} moved {} -> {} by {}",
        report_id, current.status, next, viewer.id
    );
    let report = load_report(&state, report_id, viewer.id).await?;
    Ok(Json(report))
}

async fn load_report(state: &AppState, report_id: Uuid, viewer_id: Uuid) -> Result<Report> {
    let rid = report_id.to_string();
    let vid = viewer_id.to_string();
    let row = with_db(state, move |db| db.get_report(&rid, &vid))
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(report_from_row(&row))
}
