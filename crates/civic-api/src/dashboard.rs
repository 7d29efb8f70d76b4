use axum::{Extension, extract::State};

use civic_core::stats::dashboard_summary;
use civic_types::api::DashboardSummary;
use civic_types::models::Report;

use crate::convert::report_from_row;
use crate::error::Result;
use crate::extract::Json;
use crate::middleware::Viewer;
use crate::state::{AppState, with_db};

/// GET /dashboard: status counts, community impact and the latest three
/// of the viewer's reports.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Result<Json<DashboardSummary>> {
    let vid = viewer.id.to_string();
    let rows = with_db(&state, move |db| db.get_reports_by_user(&vid, &vid)).await?;
    let reports: Vec<Report> = rows.iter().map(report_from_row).collect();

    Ok(Json(dashboard_summary(&reports)))
}
