use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, info, warn};

use civic_core::submission::ReportDraft;
use civic_types::api::ValidationErrors;
use civic_types::models::Report;

use crate::api::CivicApi;
use crate::error::ClientError;

#[derive(Debug, Clone)]
pub enum SubmissionState {
    Pending,
    Succeeded(Report),
    /// The draft is kept so the form can be corrected and sent again.
    Failed {
        message: String,
        fields: Option<ValidationErrors>,
        draft: ReportDraft,
    },
    Cancelled {
        draft: ReportDraft,
    },
}

impl SubmissionState {
    pub fn is_finished(&self) -> bool {
        !matches!(self, SubmissionState::Pending)
    }

    pub fn draft(&self) -> Option<&ReportDraft> {
        match self {
            SubmissionState::Failed { draft, .. } | SubmissionState::Cancelled { draft } => {
                Some(draft)
            }
            _ => None,
        }
    }
}

/// Handle to an in-flight report submission. Dropping it cancels the
/// request if it has not finished.
#[derive(Debug)]
pub struct Submission {
    state: watch::Receiver<SubmissionState>,
    token: CancellationToken,
    _guard: DropGuard,
}

/// Checks the draft locally, then sends it in a background task.
/// Field errors found before sending are returned without a request.
pub fn submit<A>(api: Arc<A>, draft: ReportDraft) -> Result<Submission, ValidationErrors>
where
    A: CivicApi + 'static,
{
    draft.validate()?;
    let req = draft.to_request();

    let (tx, rx) = watch::channel(SubmissionState::Pending);
    let token = CancellationToken::new();
    let cancelled = token.clone();

    tokio::spawn(async move {
        let outcome = tokio::select! {
            biased;
            _ = cancelled.cancelled() => {
                debug!("Submission of '{}' cancelled", draft.title);
                SubmissionState::Cancelled { draft }
            }
            result = api.submit_report(&req) => match result {
                Ok(report) => {
                    info!("Report {} submitted", report.id);
                    SubmissionState::Succeeded(report)
                }
                Err(e) => {
                    warn!("Submission of '{}' failed: {}", draft.title, e);
                    let fields = match e {
                        ClientError::Validation(ref fields) => Some(fields.clone()),
                        _ => None,
                    };
                    SubmissionState::Failed {
                        message: e.to_string(),
                        fields,
                        draft,
                    }
                }
            },
        };
        tx.send_replace(outcome);
    });

    Ok(Submission {
        state: rx,
        _guard: token.clone().drop_guard(),
        token,
    })
}

impl Submission {
    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Waits for the task to settle and returns its final state.
    pub async fn wait(&mut self) -> SubmissionState {
        if let Ok(state) = self.state.wait_for(SubmissionState::is_finished).await {
            return state.clone();
        }
        // Task ended without reporting; treat the last value as final.
        self.state.borrow().clone()
    }

    /// The draft to resubmit after a failure or cancellation.
    pub fn draft(&self) -> Option<ReportDraft> {
        self.state.borrow().draft().cloned()
    }
}
