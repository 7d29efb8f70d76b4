use axum::{Extension, extract::State};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use civic_core::filter::{ReportFilter, Selector};
use civic_core::page::paginate;
use civic_core::sort::SortKey;
use civic_core::stats::community_stats;
use civic_core::tabs::in_community_tab;
use civic_core::vote::VoteChange;
use civic_db::timestamp;
use civic_types::api::{CommunityFeedResponse, CommunityQuery, VoteResponse};
use civic_types::models::CommunityReport;

use crate::convert::community_report_from_row;
use crate::error::{ApiError, Result};
use crate::extract::{Json, Path, Query};
use crate::middleware::Viewer;
use crate::state::{AppState, with_db};

/// GET /community: everyone's reports after search, category filter, sort
/// and tab. Statistics cover the whole feed.
pub async fn get_feed(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Query(query): Query<CommunityQuery>,
) -> Result<Json<CommunityFeedResponse>> {
    let category = Selector::<String>::parse(query.category.as_deref()).unwrap_or_default();

    let vid = viewer.id.to_string();
    let rows = with_db(&state, move |db| db.get_community_reports(&vid)).await?;
    let feed: Vec<CommunityReport> = rows.iter().map(community_report_from_row).collect();
    let stats = community_stats(&feed);

    let filtered = ReportFilter::by_category(query.q.as_deref(), category).apply(&feed);
    let now = Utc::now();
    let in_tab: Vec<CommunityReport> = query
        .sort
        .sorted(&filtered)
        .into_iter()
        .filter(|r| in_community_tab(query.tab, r, now))
        .collect();

    Ok(Json(CommunityFeedResponse {
        page: paginate(in_tab, query.limit, query.offset),
        stats,
    }))
}

/// POST /community/{id}/upvote: flip the viewer's vote on a report.
pub async fn toggle_upvote(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(report_id): Path<Uuid>,
) -> Result<Json<VoteResponse>> {
    let rid = report_id.to_string();
    let vid = viewer.id.to_string();
    let voted_at = timestamp(Utc::now());
    let toggle = with_db(&state, move |db| db.toggle_vote(&rid, &vid, &voted_at))
        .await?
        .ok_or(ApiError::NotFound)?;

    let change = VoteChange::from_added(toggle.added);
    info!(
        "Vote {} on report {} by {} (now {})",
        if change.is_added() { "added" } else { "removed" },
        report_id,
        viewer.id,
        toggle.upvotes
    );

    Ok(Json(VoteResponse {
        upvoted: change.is_added(),
        upvotes: u32::try_from(toggle.upvotes).unwrap_or(0),
        notice: change.notice(),
    }))
}
