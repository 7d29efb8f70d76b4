use chrono::{DateTime, Utc};

use civic_types::api::{CommunityTab, ReportTab, TabCounts};
use civic_types::models::{CommunityReport, Report, Status};

use crate::stats::is_recent;

/// Upvotes needed before a report shows under the trending tab.
pub const TRENDING_MIN_UPVOTES: u32 = 10;

pub fn in_report_tab(tab: ReportTab, report: &Report) -> bool {
    match tab {
        ReportTab::All => true,
        ReportTab::Pending => report.status == Status::Pending,
        ReportTab::InProgress => report.status == Status::InProgress,
        ReportTab::Resolved => report.status == Status::Resolved,
    }
}

pub fn in_community_tab(tab: CommunityTab, report: &CommunityReport, now: DateTime<Utc>) -> bool {
    match tab {
        CommunityTab::All => true,
        CommunityTab::Trending => report.report.upvotes >= TRENDING_MIN_UPVOTES,
        CommunityTab::Recent => is_recent(&report.report, now),
        CommunityTab::Resolved => report.report.status == Status::Resolved,
    }
}

/// Size of every own-reports tab over an already filtered collection.
pub fn tab_counts(reports: &[Report]) -> TabCounts {
    let count = |tab| reports.iter().filter(|r| in_report_tab(tab, r)).count();
    TabCounts {
        all: count(ReportTab::All),
        pending: count(ReportTab::Pending),
        in_progress: count(ReportTab::InProgress),
        resolved: count(ReportTab::Resolved),
    }
}
