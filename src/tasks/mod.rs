//! Background tasks module
//! 
//! This module contains the periodic tasks that run alongside a timer
//! session: the display update tick and the autosave loop, plus the startup
//! autoload they follow.

pub mod autosave;
pub mod update_tick;

use std::future::Future;

use tokio::{sync::watch, task::JoinHandle};
use tracing::{info, warn};

// Re-export main functions
pub use autosave::{autoload, autosave_task, save_once};
pub use update_tick::update_tick_task;

/// A spawned periodic task with an explicit stop
pub struct TaskHandle {
    name: &'static str,
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl TaskHandle {
    /// Spawn `task`, handing it the receiver it must watch for shutdown
    pub fn spawn<F, Fut>(name: &'static str, task: F) -> Self
    where
        F: FnOnce(watch::Receiver<bool>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let join = tokio::spawn(task(shutdown_rx));
        info!("Started {} task", name);
        Self {
            name,
            shutdown_tx,
            join,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Signal the task and wait for it to wind down
    pub async fn stop(self) {
        if self.shutdown_tx.send(true).is_err() {
            warn!("{} task already exited", self.name);
        }
        if let Err(e) = self.join.await {
            warn!("{} task ended abnormally: {}", self.name, e);
        }
        info!("Stopped {} task", self.name);
    }
}
