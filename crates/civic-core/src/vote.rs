use civic_types::api::Notice;
use civic_types::models::Report;

/// Per (report, viewer) vote state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteState {
    NotUpvoted,
    Upvoted,
}

impl VoteState {
    pub fn from_flag(upvoted: bool) -> Self {
        if upvoted {
            VoteState::Upvoted
        } else {
            VoteState::NotUpvoted
        }
    }

    pub fn is_upvoted(self) -> bool {
        self == VoteState::Upvoted
    }

    pub fn toggled(self) -> Self {
        match self {
            VoteState::NotUpvoted => VoteState::Upvoted,
            VoteState::Upvoted => VoteState::NotUpvoted,
        }
    }
}

/// Direction of a completed toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChange {
    Added,
    Removed,
}

impl VoteChange {
    pub fn from_added(added: bool) -> Self {
        if added { VoteChange::Added } else { VoteChange::Removed }
    }

    pub fn is_added(self) -> bool {
        self == VoteChange::Added
    }

    /// Confirmation shown to the viewer. Both directions are acknowledged.
    pub fn notice(self) -> Notice {
        match self {
            VoteChange::Added => Notice::new(
                "Vote recorded",
                "Thank you for participating in your community!",
            ),
            VoteChange::Removed => Notice::new(
                "Vote removed",
                "Your vote has been withdrawn from this report.",
            ),
        }
    }

    /// Applies this change to a counter. Removing from zero stays at zero.
    pub fn apply(self, upvotes: u32) -> u32 {
        match self {
            VoteChange::Added => upvotes.saturating_add(1),
            VoteChange::Removed => upvotes.saturating_sub(1),
        }
    }
}

/// Flips the viewer's vote on `report`, adjusting the counter to match.
pub fn toggle_upvote(report: &mut Report) -> VoteChange {
    let state = VoteState::from_flag(report.is_upvoted.unwrap_or(false));
    let change = match state.toggled() {
        VoteState::Upvoted => VoteChange::Added,
        VoteState::NotUpvoted => VoteChange::Removed,
    };

    report.upvotes = change.apply(report.upvotes);
    report.is_upvoted = Some(change.is_added());
    change
}
