use std::time::Duration;

use tokio::sync::watch;

use crate::db;
use crate::state::SharedState;

const INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Periodically drop expired refresh tokens and stale login limiter entries
/// until shutdown is signaled.
pub async fn run(state: SharedState, mut shutdown: watch::Receiver<bool>) {
    let mut ticker = tokio::time::interval(INTERVAL);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = shutdown.changed() => break,
        }

        state.login_limiter.cleanup();

        match db::refresh_tokens::delete_expired(&state.pool).await {
            Ok(0) => {}
            Ok(n) => tracing::debug!("Removed {n} expired refresh tokens"),
            Err(e) => tracing::error!("Refresh token cleanup failed: {e}"),
        }
    }

    tracing::debug!("Housekeeping stopped");
}
