//! Report filtering, ordering and aggregation shared by the API server and
//! the client view state. Nothing here does I/O or reads the clock; callers
//! pass `now` where it matters.

pub mod filter;
pub mod nav;
pub mod page;
pub mod profile;
pub mod sort;
pub mod stats;
pub mod submission;
pub mod tabs;
pub mod vote;
pub mod workflow;

#[cfg(test)]
mod fixtures;
