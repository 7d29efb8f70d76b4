use std::str::FromStr;

use civic_types::models::{Report, Status};

/// A filter dropdown value: `all` or one exact value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selector<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selector<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => wanted == value,
        }
    }
}

impl<T: FromStr> Selector<T> {
    /// `None`, empty and `all` select everything.
    pub fn parse(raw: Option<&str>) -> Result<Self, T::Err> {
        match raw.map(str::trim) {
            None | Some("") | Some("all") => Ok(Selector::All),
            Some(value) => value.parse().map(Selector::Only),
        }
    }
}

/// Which field the dropdown narrows on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Facet {
    Status(Selector<Status>),
    Category(Selector<String>),
}

impl Default for Facet {
    fn default() -> Self {
        Facet::Status(Selector::All)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    search: String,
    facet: Facet,
}

impl ReportFilter {
    pub fn new(search: Option<&str>, facet: Facet) -> Self {
        Self {
            search: search.map(|s| s.trim().to_lowercase()).unwrap_or_default(),
            facet,
        }
    }

    pub fn by_status(search: Option<&str>, status: Selector<Status>) -> Self {
        Self::new(search, Facet::Status(status))
    }

    pub fn by_category(search: Option<&str>, category: Selector<String>) -> Self {
        Self::new(search, Facet::Category(category))
    }

    pub fn matches(&self, report: &Report) -> bool {
        self.matches_search(report) && self.matches_facet(report)
    }

    fn matches_search(&self, report: &Report) -> bool {
        self.search.is_empty()
            || report.title.to_lowercase().contains(&self.search)
            || report.description.to_lowercase().contains(&self.search)
    }

    fn matches_facet(&self, report: &Report) -> bool {
        match &self.facet {
            Facet::Status(selector) => selector.matches(&report.status),
            Facet::Category(selector) => selector.matches(&report.category),
        }
    }

    /// Keeps the matching reports in their original order.
    pub fn apply<R>(&self, reports: &[R]) -> Vec<R>
    where
        R: AsRef<Report> + Clone,
    {
        reports
            .iter()
            .filter(|r| self.matches(r.as_ref()))
            .cloned()
            .collect()
    }
}
