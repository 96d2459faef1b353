//! Display update tick

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::watch,
    time::{interval, MissedTickBehavior},
};
use tracing::{info, warn};

use crate::state::AppState;

/// Recompute every timer's total once per `period` until shut down
pub async fn update_tick_task(
    state: Arc<AppState>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    info!("Starting update tick every {:?}", period);

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = state.update_all() {
                    warn!("Failed to update timers: {}", e);
                }
            }
            _ = shutdown.changed() => break,
        }
    }
}
