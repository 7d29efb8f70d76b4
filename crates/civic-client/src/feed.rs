use std::collections::HashSet;

use tracing::{debug, warn};
use uuid::Uuid;

use civic_core::vote::{self, VoteChange};
use civic_types::api::{CommunityQuery, CommunityStats, Notice, VoteResponse};
use civic_types::models::CommunityReport;

use crate::api::CivicApi;
use crate::error::Result;

/// The community page: the last fetched page of the feed plus its
/// statistics, with votes applied locally before the server confirms them.
#[derive(Debug, Default)]
pub struct CommunityFeed {
    query: CommunityQuery,
    items: Vec<CommunityReport>,
    total: usize,
    stats: CommunityStats,
    in_flight: HashSet<Uuid>,
    /// Bumped by every refresh; votes begun on an older page leave the
    /// new one alone.
    generation: u64,
}

/// A vote already shown locally and waiting for the server.
#[derive(Debug)]
#[must_use = "finish the vote with the server's answer"]
pub struct PendingVote {
    report_id: Uuid,
    generation: u64,
    upvotes_before: u32,
    upvoted_before: Option<bool>,
    change: VoteChange,
}

impl PendingVote {
    pub fn report_id(&self) -> Uuid {
        self.report_id
    }

    pub fn change(&self) -> VoteChange {
        self.change
    }
}

impl CommunityFeed {
    pub fn new(query: CommunityQuery) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    pub fn query(&self) -> &CommunityQuery {
        &self.query
    }

    pub fn set_query(&mut self, query: CommunityQuery) {
        self.query = query;
    }

    pub fn items(&self) -> &[CommunityReport] {
        &self.items
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn stats(&self) -> CommunityStats {
        self.stats
    }

    pub fn get(&self, report_id: Uuid) -> Option<&CommunityReport> {
        self.items.iter().find(|r| r.report.id == report_id)
    }

    pub fn is_in_flight(&self, report_id: Uuid) -> bool {
        self.in_flight.contains(&report_id)
    }

    /// Replaces the page with a fresh fetch for the current query.
    pub async fn refresh<A: CivicApi>(&mut self, api: &A) -> Result<()> {
        let resp = api.community(&self.query).await?;
        debug!(
            "Community feed refreshed: {} of {} reports",
            resp.page.items.len(),
            resp.page.total
        );
        self.items = resp.page.items;
        self.total = resp.page.total;
        self.stats = resp.stats;
        self.in_flight.clear();
        self.generation += 1;
        Ok(())
    }

    /// Flips the viewer's vote locally. Returns `None` when the report is not
    /// on this page or a vote on it is still waiting for the server.
    pub fn begin_upvote(&mut self, report_id: Uuid) -> Option<PendingVote> {
        if self.in_flight.contains(&report_id) {
            return None;
        }
        let item = self
            .items
            .iter_mut()
            .find(|r| r.report.id == report_id)?;

        let upvotes_before = item.report.upvotes;
        let upvoted_before = item.report.is_upvoted;
        let change = vote::toggle_upvote(&mut item.report);
        let upvotes_after = item.report.upvotes;

        self.shift_total_upvotes(upvotes_before, upvotes_after);
        self.in_flight.insert(report_id);

        Some(PendingVote {
            report_id,
            generation: self.generation,
            upvotes_before,
            upvoted_before,
            change,
        })
    }

    /// Settles a vote: the server's count wins on success, the local state
    /// is put back on failure. A vote begun before the last refresh only
    /// reports its outcome; the fetched page already reflects the server.
    pub fn finish_upvote(
        &mut self,
        pending: PendingVote,
        outcome: Result<VoteResponse>,
    ) -> Result<Notice> {
        if pending.generation != self.generation {
            return outcome.map(|resp| resp.notice);
        }
        self.in_flight.remove(&pending.report_id);

        let Some(item) = self
            .items
            .iter_mut()
            .find(|r| r.report.id == pending.report_id)
        else {
            return outcome.map(|resp| resp.notice);
        };
        let shown = item.report.upvotes;

        match outcome {
            Ok(resp) => {
                item.report.upvotes = resp.upvotes;
                item.report.is_upvoted = Some(resp.upvoted);
                self.shift_total_upvotes(shown, resp.upvotes);
                Ok(resp.notice)
            }
            Err(e) => {
                warn!("Vote on {} failed, rolling back: {}", pending.report_id, e);
                item.report.upvotes = pending.upvotes_before;
                item.report.is_upvoted = pending.upvoted_before;
                self.shift_total_upvotes(shown, pending.upvotes_before);
                Err(e)
            }
        }
    }

    /// Optimistic toggle round trip. `Ok(None)` means nothing was sent.
    pub async fn toggle_upvote<A: CivicApi>(
        &mut self,
        api: &A,
        report_id: Uuid,
    ) -> Result<Option<Notice>> {
        let Some(pending) = self.begin_upvote(report_id) else {
            return Ok(None);
        };
        let outcome = api.toggle_upvote(report_id).await;
        self.finish_upvote(pending, outcome).map(Some)
    }

    fn shift_total_upvotes(&mut self, from: u32, to: u32) {
        self.stats.total_upvotes = (self.stats.total_upvotes + u64::from(to))
            .saturating_sub(u64::from(from));
    }
}
