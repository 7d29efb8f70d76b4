use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use civic_db::models::{ReportRow, UserRow};
use civic_types::models::{Author, CommunityReport, Location, Priority, Report, Status, User};

pub fn parse_timestamp(raw: &str, field: &str, id: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // Rows written by hand through sqlite3 use "YYYY-MM-DD HH:MM:SS"
            // without a timezone. Parse as naive UTC and convert.
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt {} '{}' on '{}': {}", field, raw, id, e);
            DateTime::default()
        })
}

fn parse_uuid(raw: &str, field: &str, id: &str) -> Uuid {
    raw.parse().unwrap_or_else(|e| {
        warn!("Corrupt {} '{}' on '{}': {}", field, raw, id, e);
        Uuid::default()
    })
}

fn counter(raw: i64, field: &str, id: &str) -> u32 {
    u32::try_from(raw).unwrap_or_else(|_| {
        warn!("Out of range {} {} on report '{}'", field, raw, id);
        0
    })
}

pub fn report_from_row(row: &ReportRow) -> Report {
    Report {
        id: parse_uuid(&row.id, "id", &row.id),
        title: row.title.clone(),
        description: row.description.clone(),
        category: row.category.clone(),
        status: row.status.parse().unwrap_or_else(|e| {
            warn!("{} on report '{}'", e, row.id);
            Status::Pending
        }),
        priority: row.priority.parse().unwrap_or_else(|e| {
            warn!("{} on report '{}'", e, row.id);
            Priority::Low
        }),
        location: Location {
            lat: row.lat,
            lng: row.lng,
            address: row.address.clone(),
        },
        images: row.images.clone(),
        user_id: parse_uuid(&row.user_id, "user_id", &row.id),
        created_at: parse_timestamp(&row.created_at, "created_at", &row.id),
        updated_at: parse_timestamp(&row.updated_at, "updated_at", &row.id),
        upvotes: counter(row.upvotes, "upvotes", &row.id),
        is_upvoted: Some(row.is_upvoted),
    }
}

pub fn community_report_from_row(row: &ReportRow) -> CommunityReport {
    CommunityReport {
        report: report_from_row(row),
        author: Author {
            name: row.author_name.clone(),
            avatar: row.author_avatar.clone(),
        },
        comments_count: counter(row.comments_count, "comments_count", &row.id),
    }
}

pub fn user_from_row(row: UserRow) -> User {
    User {
        id: parse_uuid(&row.id, "id", &row.id),
        joined_at: parse_timestamp(&row.joined_at, "joined_at", &row.id),
        email: row.email,
        name: row.name,
        phone: row.phone,
        address: row.address,
        avatar: row.avatar,
    }
}
