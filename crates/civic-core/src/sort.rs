use std::cmp::Ordering;

use civic_types::api::{CommunitySort, ReportSort};
use civic_types::models::{CommunityReport, Report};

/// A total order over listed items. Sorting is stable, so ties keep the
/// relative order they had on input.
pub trait SortKey<T: Clone> {
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Returns a sorted copy; the input is left untouched.
    fn sorted(&self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        out.sort_by(|a, b| self.compare(a, b));
        out
    }
}

impl<R> SortKey<R> for ReportSort
where
    R: AsRef<Report> + Clone,
{
    fn compare(&self, a: &R, b: &R) -> Ordering {
        let (a, b) = (a.as_ref(), b.as_ref());
        match self {
            ReportSort::Newest => b.created_at.cmp(&a.created_at),
            ReportSort::Oldest => a.created_at.cmp(&b.created_at),
            ReportSort::Priority => b.priority.rank().cmp(&a.priority.rank()),
            ReportSort::Upvotes => b.upvotes.cmp(&a.upvotes),
        }
    }
}

impl SortKey<CommunityReport> for CommunitySort {
    fn compare(&self, a: &CommunityReport, b: &CommunityReport) -> Ordering {
        match self {
            CommunitySort::Trending => b.report.upvotes.cmp(&a.report.upvotes),
            CommunitySort::Newest => b.report.created_at.cmp(&a.report.created_at),
            CommunitySort::Oldest => a.report.created_at.cmp(&b.report.created_at),
            CommunitySort::MostCommented => b.comments_count.cmp(&a.comments_count),
        }
    }
}
