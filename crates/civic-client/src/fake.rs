use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use reqwest::StatusCode;
use uuid::Uuid;

use civic_core::stats::community_stats;
use civic_core::vote::VoteChange;
use civic_types::api::{
    CommunityFeedResponse, CommunityQuery, CreateReportRequest, ErrorBody, Page,
    ValidationErrors, VoteResponse,
};
use civic_types::models::{Author, CommunityReport, Location, Priority, Report, Status};

use crate::api::CivicApi;
use crate::error::{ClientError, Result};

#[derive(Debug, Clone)]
pub enum SubmitMode {
    Accept,
    Reject(ValidationErrors),
    Hang,
}

/// In-memory stand-in for the server.
pub struct FakeApi {
    feed: Mutex<Vec<CommunityReport>>,
    voted: Mutex<HashSet<Uuid>>,
    fail_votes: AtomicBool,
    vote_calls: AtomicUsize,
    submit_mode: Mutex<SubmitMode>,
    submit_calls: AtomicUsize,
    pub submit_dropped: Arc<AtomicBool>,
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::with_feed(&[])
    }

    pub fn with_feed(reports: &[(&str, u32)]) -> Self {
        let now = Utc::now();
        let feed = reports
            .iter()
            .map(|(title, upvotes)| CommunityReport {
                report: Report {
                    id: Uuid::new_v4(),
                    title: title.to_string(),
                    description: format!("{title} needs attention"),
                    category: "Other".into(),
                    status: Status::Pending,
                    priority: Priority::Medium,
                    location: Location {
                        lat: 0.0,
                        lng: 0.0,
                        address: "Main St".into(),
                    },
                    images: Vec::new(),
                    user_id: Uuid::new_v4(),
                    created_at: now,
                    updated_at: now,
                    upvotes: *upvotes,
                    is_upvoted: Some(false),
                },
                author: Author {
                    name: "Maria Garcia".into(),
                    avatar: None,
                },
                comments_count: 0,
            })
            .collect();

        Self {
            feed: Mutex::new(feed),
            voted: Mutex::new(HashSet::new()),
            fail_votes: AtomicBool::new(false),
            vote_calls: AtomicUsize::new(0),
            submit_mode: Mutex::new(SubmitMode::Accept),
            submit_calls: AtomicUsize::new(0),
            submit_dropped: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn fail_votes(&self, fail: bool) {
        self.fail_votes.store(fail, Ordering::SeqCst);
    }

    pub fn vote_calls(&self) -> usize {
        self.vote_calls.load(Ordering::SeqCst)
    }

    pub fn bump_upvotes(&self, report_id: Uuid, by: u32) {
        let mut feed = self.feed.lock().unwrap();
        if let Some(r) = feed.iter_mut().find(|r| r.report.id == report_id) {
            r.report.upvotes += by;
        }
    }

    pub fn set_submit_mode(&self, mode: SubmitMode) {
        *self.submit_mode.lock().unwrap() = mode;
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }
}

impl CivicApi for FakeApi {
    async fn community(&self, _query: &CommunityQuery) -> Result<CommunityFeedResponse> {
        let feed = self.feed.lock().unwrap().clone();
        Ok(CommunityFeedResponse {
            stats: community_stats(&feed),
            page: Page {
                total: feed.len(),
                limit: 50,
                offset: 0,
                items: feed,
            },
        })
    }

    async fn toggle_upvote(&self, report_id: Uuid) -> Result<VoteResponse> {
        self.vote_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_votes.load(Ordering::SeqCst) {
            return Err(ClientError::Api {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: ErrorBody::Internal,
            });
        }

        let mut voted = self.voted.lock().unwrap();
        let change = VoteChange::from_added(voted.insert(report_id));
        if !change.is_added() {
            voted.remove(&report_id);
        }

        let mut feed = self.feed.lock().unwrap();
        let report = feed
            .iter_mut()
            .find(|r| r.report.id == report_id)
            .map(|r| &mut r.report)
            .ok_or(ClientError::Api {
                status: StatusCode::NOT_FOUND,
                body: ErrorBody::NotFound,
            })?;
        report.upvotes = change.apply(report.upvotes);

        Ok(VoteResponse {
            upvoted: change.is_added(),
            upvotes: report.upvotes,
            notice: change.notice(),
        })
    }

    async fn submit_report(&self, req: &CreateReportRequest) -> Result<Report> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        let mode = self.submit_mode.lock().unwrap().clone();
        match mode {
            SubmitMode::Accept => {
                let new = civic_core::submission::validate(req).map_err(ClientError::Validation)?;
                Ok(new.into_report(Uuid::new_v4(), Uuid::new_v4(), Utc::now()))
            }
            SubmitMode::Reject(fields) => Err(ClientError::Validation(fields)),
            SubmitMode::Hang => {
                let _flag = DropFlag(self.submit_dropped.clone());
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}
