use std::future::Future;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use civic_types::api::{
    CommunityFeedResponse, CommunityQuery, CreateReportRequest, DashboardSummary, ErrorBody,
    NavigationQuery, NavigationResponse, ProfileResponse, ProfileUpdateResponse,
    ReportListResponse, ReportQuery, UpdateProfileRequest, UpdateStatusRequest, VIEWER_HEADER,
    VoteResponse,
};
use civic_types::models::{Report, Status};

use crate::error::{ClientError, Result};

/// The calls the feed and submission state drive. `ApiClient` is the real
/// implementation.
pub trait CivicApi: Send + Sync {
    fn community(
        &self,
        query: &CommunityQuery,
    ) -> impl Future<Output = Result<CommunityFeedResponse>> + Send;

    fn toggle_upvote(&self, report_id: Uuid) -> impl Future<Output = Result<VoteResponse>> + Send;

    fn submit_report(
        &self,
        req: &CreateReportRequest,
    ) -> impl Future<Output = Result<Report>> + Send;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    viewer: Uuid,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, viewer: Uuid) -> Self {
        Self::with_client(Client::new(), base_url, viewer)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>, viewer: Uuid) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            viewer,
        }
    }

    pub fn viewer(&self) -> Uuid {
        self.viewer
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn categories(&self) -> Result<Vec<String>> {
        self.send(self.http.get(self.url("/categories"))).await
    }

    pub async fn navigation(&self, query: &NavigationQuery) -> Result<NavigationResponse> {
        self.send(self.http.get(self.url("/navigation")).query(query))
            .await
    }

    pub async fn dashboard(&self) -> Result<DashboardSummary> {
        self.send(self.http.get(self.url("/dashboard"))).await
    }

    pub async fn reports(&self, query: &ReportQuery) -> Result<ReportListResponse> {
        self.send(self.http.get(self.url("/reports")).query(query))
            .await
    }

    pub async fn report(&self, report_id: Uuid) -> Result<Report> {
        self.send(self.http.get(self.url(&format!("/reports/{report_id}"))))
            .await
    }

    pub async fn update_status(&self, report_id: Uuid, status: Status) -> Result<Report> {
        let url = self.url(&format!("/reports/{report_id}/status"));
        self.send(self.http.patch(url).json(&UpdateStatusRequest { status }))
            .await
    }

    pub async fn profile(&self) -> Result<ProfileResponse> {
        self.send(self.http.get(self.url("/profile"))).await
    }

    pub async fn update_profile(&self, req: &UpdateProfileRequest) -> Result<ProfileUpdateResponse> {
        self.send(self.http.put(self.url("/profile")).json(req))
            .await
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let resp = req
            .header(VIEWER_HEADER, self.viewer.to_string())
            .send()
            .await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }

    let text = resp.text().await?;
    let body = serde_json::from_str(&text).unwrap_or_else(|e| {
        debug!("Unparseable {} error body ({}): {}", status, e, text);
        ErrorBody::Internal
    });
    Err(match body {
        ErrorBody::Validation { fields } => ClientError::Validation(fields),
        body => ClientError::Api { status, body },
    })
}

impl CivicApi for ApiClient {
    async fn community(&self, query: &CommunityQuery) -> Result<CommunityFeedResponse> {
        self.send(self.http.get(self.url("/community")).query(query))
            .await
    }

    async fn toggle_upvote(&self, report_id: Uuid) -> Result<VoteResponse> {
        let url = self.url(&format!("/community/{report_id}/upvote"));
        self.send(self.http.post(url)).await
    }

    async fn submit_report(&self, req: &CreateReportRequest) -> Result<Report> {
        self.send(self.http.post(self.url("/reports")).json(req))
            .await
    }
}
