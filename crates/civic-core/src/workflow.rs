use civic_types::models::Status;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot move a report from {from} to {to}")]
pub struct IllegalTransition {
    pub from: Status,
    pub to: Status,
}

/// Statuses reachable in one step from `from`.
pub fn next_statuses(from: Status) -> &'static [Status] {
    match from {
        Status::Pending => &[Status::InProgress, Status::Rejected],
        Status::InProgress => &[Status::Resolved, Status::Rejected],
        Status::Resolved | Status::Rejected => &[],
    }
}

pub fn is_terminal(status: Status) -> bool {
    next_statuses(status).is_empty()
}

pub fn transition(from: Status, to: Status) -> Result<Status, IllegalTransition> {
    if next_statuses(from).contains(&to) {
        Ok(to)
    } else {
        Err(IllegalTransition { from, to })
    }
}
