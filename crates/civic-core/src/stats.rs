use chrono::{DateTime, Utc};

use civic_types::api::{CommunityStats, DashboardSummary, ProfileStats, ReportSort, StatusCounts};
use civic_types::models::{CommunityReport, Report, Status};

use crate::sort::SortKey;

/// Reports created this many whole days ago (or fewer) count as recent.
pub const RECENT_DAYS: i64 = 7;

/// Number of reports surfaced on the dashboard.
pub const DASHBOARD_RECENT: usize = 3;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

pub fn status_counts<R: AsRef<Report>>(reports: &[R]) -> StatusCounts {
    let mut counts = StatusCounts {
        total: reports.len(),
        ..StatusCounts::default()
    };
    for report in reports {
        match report.as_ref().status {
            Status::Pending => counts.pending += 1,
            Status::InProgress => counts.in_progress += 1,
            Status::Resolved => counts.resolved += 1,
            Status::Rejected => counts.rejected += 1,
        }
    }
    counts
}

pub fn total_upvotes<R: AsRef<Report>>(reports: &[R]) -> u64 {
    reports.iter().map(|r| u64::from(r.as_ref().upvotes)).sum()
}

pub fn total_comments(reports: &[CommunityReport]) -> u64 {
    reports.iter().map(|r| u64::from(r.comments_count)).sum()
}

/// Whole days elapsed since `created_at`, rounded down. Timestamps in the
/// future give negative values.
pub fn days_since(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - created_at)
        .num_milliseconds()
        .div_euclid(MILLIS_PER_DAY)
}

pub fn is_recent(report: &Report, now: DateTime<Utc>) -> bool {
    days_since(report.created_at, now) <= RECENT_DAYS
}

/// Dashboard cards for the viewer's own reports.
pub fn dashboard_summary(reports: &[Report]) -> DashboardSummary {
    let recent_reports = ReportSort::Newest
        .sorted(reports)
        .into_iter()
        .take(DASHBOARD_RECENT)
        .collect();

    DashboardSummary {
        counts: status_counts(reports),
        total_upvotes: total_upvotes(reports),
        recent_reports,
    }
}

pub fn profile_stats(reports: &[Report]) -> ProfileStats {
    let counts = status_counts(reports);
    ProfileStats {
        total_reports: counts.total,
        resolved: counts.resolved,
        pending: counts.pending,
        total_upvotes: total_upvotes(reports),
    }
}

pub fn community_stats(reports: &[CommunityReport]) -> CommunityStats {
    CommunityStats {
        total_reports: reports.len(),
        total_upvotes: total_upvotes(reports),
        total_comments: total_comments(reports),
        resolved: status_counts(reports).resolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{aged, community, epoch, report, with_status};
    use chrono::Duration;
    use civic_types::models::Priority;

    #[test]
    fn counts_by_status() {
        let reports = vec![
            with_status(report("a", Priority::Low, 1), Status::Pending),
            with_status(report("b", Priority::Low, 2), Status::Pending),
            with_status(report("c", Priority::Low, 3), Status::InProgress),
            with_status(report("d", Priority::Low, 4), Status::Resolved),
            with_status(report("e", Priority::Low, 5), Status::Rejected),
        ];

        let counts = status_counts(&reports);
        assert_eq!(
            counts,
            StatusCounts {
                total: 5,
                pending: 2,
                in_progress: 1,
                resolved: 1,
                rejected: 1,
            }
        );
        assert_eq!(total_upvotes(&reports), 15);
    }

    #[test]
    fn partial_days_round_down() {
        let now = epoch();
        assert_eq!(days_since(now - Duration::hours(23), now), 0);
        assert_eq!(days_since(now - Duration::hours(24), now), 1);
        assert_eq!(days_since(now - Duration::hours(7 * 24 + 23), now), 7);
        assert_eq!(days_since(now - Duration::days(8), now), 8);
        assert_eq!(days_since(now + Duration::hours(1), now), -1);
    }

    #[test]
    fn recency_window_is_seven_whole_days() {
        let now = epoch();
        let mut almost_eight = report("old-ish", Priority::Low, 0);
        almost_eight.created_at = now - Duration::hours(8 * 24 - 1);

        assert!(is_recent(&aged(report("today", Priority::Low, 0), 0), now));
        assert!(is_recent(&aged(report("week", Priority::Low, 0), 7), now));
        assert!(is_recent(&almost_eight, now));
        assert!(!is_recent(&aged(report("stale", Priority::Low, 0), 8), now));
    }

    #[test]
    fn dashboard_takes_three_newest() {
        let reports = vec![
            aged(report("d", Priority::Low, 1), 9),
            aged(report("a", Priority::Low, 1), 0),
            aged(report("c", Priority::Low, 1), 4),
            aged(report("b", Priority::Low, 1), 2),
        ];

        let summary = dashboard_summary(&reports);
        let titles: Vec<_> = summary
            .recent_reports
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, ["a", "b", "c"]);
        assert_eq!(summary.counts.total, 4);
        assert_eq!(summary.total_upvotes, 4);
    }

    #[test]
    fn community_totals() {
        let feed = vec![
            community(with_status(report("a", Priority::Low, 12), Status::Resolved), 3),
            community(report("b", Priority::Low, 8), 5),
        ];

        let stats = community_stats(&feed);
        assert_eq!(stats.total_reports, 2);
        assert_eq!(stats.total_upvotes, 20);
        assert_eq!(stats.total_comments, 8);
        assert_eq!(stats.resolved, 1);
    }

    #[test]
    fn profile_counts() {
        let reports = vec![
            with_status(report("a", Priority::Low, 2), Status::Resolved),
            with_status(report("b", Priority::Low, 3), Status::Pending),
            with_status(report("c", Priority::Low, 0), Status::InProgress),
        ];

        let stats = profile_stats(&reports);
        assert_eq!(stats.total_reports, 3);
        assert_eq!(stats.resolved, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.total_upvotes, 5);
    }
}
