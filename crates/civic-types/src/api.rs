use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{CommunityReport, Priority, Report, Status, User};

/// Header carrying the resolved viewer id. Session handling lives in front of
/// this service; by the time a request arrives the viewer is already known.
pub const VIEWER_HEADER: &str = "x-user-id";

// -- Listing --

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportSort {
    #[default]
    Newest,
    Oldest,
    Priority,
    Upvotes,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommunitySort {
    #[default]
    Trending,
    Newest,
    Oldest,
    MostCommented,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportTab {
    #[default]
    All,
    Pending,
    InProgress,
    Resolved,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommunityTab {
    #[default]
    All,
    Trending,
    Recent,
    Resolved,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// `all` or a status value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub sort: ReportSort,
    #[serde(default)]
    pub tab: ReportTab,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// `all` or a category name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub sort: CommunitySort,
    #[serde(default)]
    pub tab: CommunityTab,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

pub fn default_limit() -> u32 {
    50
}

impl Default for ReportQuery {
    fn default() -> Self {
        Self {
            q: None,
            status: None,
            sort: ReportSort::default(),
            tab: ReportTab::default(),
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl Default for CommunityQuery {
    fn default() -> Self {
        Self {
            q: None,
            category: None,
            sort: CommunitySort::default(),
            tab: CommunityTab::default(),
            limit: default_limit(),
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabCounts {
    pub all: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportListResponse {
    #[serde(flatten)]
    pub page: Page<Report>,
    pub tabs: TabCounts,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityFeedResponse {
    #[serde(flatten)]
    pub page: Page<CommunityReport>,
    pub stats: CommunityStats,
}

// -- Statistics --

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub counts: StatusCounts,
    pub total_upvotes: u64,
    pub recent_reports: Vec<Report>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub total_reports: usize,
    pub resolved: usize,
    pub pending: usize,
    pub total_upvotes: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityStats {
    pub total_reports: usize,
    pub total_upvotes: u64,
    pub total_comments: u64,
    pub resolved: usize,
}

// -- Submission --

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct CreateReportRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Option<Priority>,
    /// Display address as typed by the reporter.
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateStatusRequest {
    pub status: Status,
}

// -- Votes --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteResponse {
    pub upvoted: bool,
    pub upvotes: u32,
    pub notice: Notice,
}

// -- Profile --

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: User,
    pub stats: ProfileStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdateResponse {
    pub user: User,
    pub notice: Notice,
}

// -- Navigation --

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarMode {
    #[default]
    Expanded,
    Collapsed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigationQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub mode: SidebarMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Hidden when the sidebar is collapsed.
    pub title: Option<String>,
    pub path: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSection {
    pub label: Option<String>,
    pub items: Vec<NavItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationResponse {
    pub mode: SidebarMode,
    pub sections: Vec<NavSection>,
    pub logout_path: String,
}

// -- Errors --

/// Field name -> human readable message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field`. The first message per field wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// JSON body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ErrorBody {
    Validation { fields: ValidationErrors },
    BadRequest { message: String },
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict { message: String },
    Internal,
}
