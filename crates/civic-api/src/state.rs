use std::collections::HashSet;
use std::sync::Arc;

use tracing::error;
use uuid::Uuid;

use civic_db::Database;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    /// Viewers allowed to move reports through the status workflow.
    pub admins: HashSet<Uuid>,
}

impl AppStateInner {
    pub fn new(db: Database, admins: HashSet<Uuid>) -> AppState {
        Arc::new(Self { db, admins })
    }

    pub fn is_admin(&self, viewer: Uuid) -> bool {
        self.admins.contains(&viewer)
    }
}

/// Runs a blocking DB call off the async runtime.
pub async fn with_db<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal
        })?
        .map_err(ApiError::Database)
}
