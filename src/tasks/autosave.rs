//! Startup autoload and the recurring autosave loop

use std::{sync::Arc, time::Duration};
use tokio::{sync::watch, time::sleep};
use tracing::{debug, info, warn};

use crate::{error::Result, state::AppState, store::TimerStore};

/// Restore the last saved document, if any
///
/// Failures are logged and swallowed; the session then starts empty.
pub async fn autoload<S: TimerStore>(state: &AppState, store: &S) -> usize {
    match store.load().await {
        Ok(Some(records)) if !records.is_empty() => match state.deserialize_all(&records) {
            Ok(count) => count,
            Err(e) => {
                warn!("Failed to restore saved timers: {}", e);
                0
            }
        },
        Ok(_) => {
            info!("No saved timers, starting empty");
            0
        }
        Err(e) => {
            warn!("Autoload failed, starting empty: {}", e);
            0
        }
    }
}

/// Send the current document to the store once
pub async fn save_once<S: TimerStore>(state: &AppState, store: &S) -> Result<usize> {
    let records = state.serialize_all()?;
    store.save(&records).await?;
    Ok(records.len())
}

/// Save now, then again `period` after each attempt finishes, until shut down
///
/// A save still in flight when shutdown arrives is abandoned.
pub async fn autosave_task<S: TimerStore>(
    state: Arc<AppState>,
    store: Arc<S>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    info!("Starting autosave every {:?}", period);

    loop {
        tokio::select! {
            result = save_once(&state, store.as_ref()) => match result {
                Ok(count) => debug!("Autosaved {} timers", count),
                Err(e) => warn!("Autosave failed: {}", e),
            },
            _ = shutdown.changed() => {
                warn!("Autosave interrupted by shutdown");
                break;
            }
        }

        tokio::select! {
            _ = sleep(period) => {}
            _ = shutdown.changed() => break,
        }
    }
}
