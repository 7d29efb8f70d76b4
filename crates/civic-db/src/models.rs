//! Rows as SQLite stores them: ids and timestamps stay strings and
//! counters stay `i64`. The API layer converts them into civic-types models.

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar: Option<String>,
    pub joined_at: String,
}

/// A report joined with its author, images and the viewer's vote.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub priority: String,
    pub lat: f64,
    pub lng: f64,
    pub address: String,
    pub upvotes: i64,
    pub comments_count: i64,
    pub created_at: String,
    pub updated_at: String,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub is_upvoted: bool,
    pub images: Vec<String>,
}

/// Columns written when a report is created.
#[derive(Debug, Clone)]
pub struct NewReportRow<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub status: &'a str,
    pub priority: &'a str,
    pub lat: f64,
    pub lng: f64,
    pub address: &'a str,
    pub images: &'a [String],
    pub created_at: &'a str,
}

/// Outcome of toggling a vote on an existing report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteToggle {
    pub added: bool,
    pub upvotes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileUpdate {
    Updated,
    NotFound,
    EmailTaken,
}
