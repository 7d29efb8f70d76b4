use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use civic_types::models::{Author, CommunityReport, Location, Priority, Report, Status};

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

pub fn report(title: &str, priority: Priority, upvotes: u32) -> Report {
    Report {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: format!("{title} needs attention"),
        category: "Other".to_string(),
        status: Status::Pending,
        priority,
        location: Location {
            lat: 40.7128,
            lng: -74.006,
            address: "1 Main St".to_string(),
        },
        images: vec![],
        user_id: Uuid::nil(),
        created_at: epoch(),
        updated_at: epoch(),
        upvotes,
        is_upvoted: Some(false),
    }
}

pub fn aged(mut report: Report, days_ago: i64) -> Report {
    report.created_at = epoch() - Duration::days(days_ago);
    report.updated_at = report.created_at;
    report
}

pub fn with_status(mut report: Report, status: Status) -> Report {
    report.status = status;
    report
}

pub fn community(report: Report, comments_count: u32) -> CommunityReport {
    CommunityReport {
        report,
        author: Author {
            name: "Jordan Lee".to_string(),
            avatar: None,
        },
        comments_count,
    }
}
