//! Headless terminal session
//!
//! Reads line commands from stdin, applies them to the shared state and
//! prints a readout whenever a timer changes.

use std::{sync::Arc, time::Duration};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::{
        broadcast::{self, error::RecvError},
        watch,
    },
};
use tracing::{error, info, warn};

use super::commands::{Command, HELP};
use crate::{
    error::{Result, TimesheetError},
    state::{AppState, Timer, TimerEvent},
    store::{FileStore, TimerStore},
    tasks::{autoload, autosave_task, save_once, update_tick_task, TaskHandle},
    utils::shutdown_signal,
};

/// What the session loop should do after a command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Continue(Option<String>),
    Quit,
}

/// One row of the timer list
pub fn format_timer(position: usize, timer: &Timer) -> String {
    let readout = timer.readout();
    format!(
        "{:>2}. {:<24} {:>10} {:>10}  {}",
        position,
        timer.title(),
        readout.time_text,
        readout.billed_text,
        if timer.is_started() { "running" } else { "paused" },
    )
}

pub fn format_list(timers: &[Timer]) -> String {
    if timers.is_empty() {
        return "No timers. Type 'add' to create one.".to_string();
    }
    timers
        .iter()
        .enumerate()
        .map(|(index, timer)| format_timer(index + 1, timer))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Apply one command to the session
pub async fn execute(state: &AppState, command: Command) -> Result<Outcome> {
    let message = match command {
        Command::Add(title) => {
            state.add_timer(title)?;
            None
        }
        Command::Start(at) => {
            state.start(state.id_at(at)?)?;
            None
        }
        Command::Pause(at) => {
            state.pause(state.id_at(at)?)?;
            None
        }
        Command::Reset(at) => {
            state.reset(state.id_at(at)?)?;
            None
        }
        Command::Adjust(at, delta) => {
            state.adjust(state.id_at(at)?, delta)?;
            None
        }
        Command::Rate(at, rate) => {
            state.set_rate(state.id_at(at)?, rate)?;
            None
        }
        Command::Title(at, title) => {
            state.set_title(state.id_at(at)?, title)?;
            None
        }
        Command::Remove(at) => {
            state.remove(state.id_at(at)?)?;
            None
        }
        Command::Clear => {
            state.clear()?;
            None
        }
        Command::List => {
            state.update_all()?;
            Some(format_list(&state.snapshot()?))
        }
        Command::Export(path) => {
            let store = FileStore::new(path);
            let count = save_once(state, &store).await?;
            Some(format!("Saved {} timers to {}", count, store.path().display()))
        }
        Command::Import(path) => {
            let store = FileStore::new(path);
            match store.import().await {
                Ok(records) => {
                    let count = state.deserialize_all(&records)?;
                    Some(format!("Loaded {} timers", count))
                }
                Err(e @ TimesheetError::InvalidDocument(_)) => {
                    println!("Invalid save file!");
                    return Err(e);
                }
                Err(e) => return Err(e),
            }
        }
        Command::Help => Some(HELP.to_string()),
        Command::Quit => return Ok(Outcome::Quit),
    };
    Ok(Outcome::Continue(message))
}

fn describe(event: &TimerEvent) -> String {
    match event {
        TimerEvent::Added(timer) => format!("+ {}  {}", timer.title(), timer.readout()),
        TimerEvent::Changed(timer) => format!(
            "* {}  {}{}",
            timer.title(),
            timer.readout(),
            if timer.is_started() { "  (running)" } else { "" },
        ),
        TimerEvent::Removed(id) => format!("- removed timer {}", id),
        TimerEvent::Cleared => "- cleared all timers".to_string(),
        TimerEvent::Loaded(count) => format!("loaded {} timers", count),
    }
}

/// Print every state change until shut down
pub async fn print_events_task(
    mut events: broadcast::Receiver<TimerEvent>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => println!("{}", describe(&event)),
                Err(RecvError::Lagged(skipped)) => warn!("Skipped {} timer events", skipped),
                Err(RecvError::Closed) => break,
            },
            _ = shutdown.changed() => break,
        }
    }
}

/// Session timing knobs
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub autosave_period: Duration,
    pub tick_period: Duration,
}

/// Run an interactive session until `quit`, end of input or a signal
pub async fn run_session<S>(state: Arc<AppState>, store: Arc<S>, config: SessionConfig) -> Result<()>
where
    S: TimerStore + 'static,
{
    let events = state.subscribe();
    let printer = TaskHandle::spawn("event printer", move |shutdown| {
        print_events_task(events, shutdown)
    });

    let restored = autoload(&state, store.as_ref()).await;
    info!("Session started with {} timers", restored);
    println!("{}", format_list(&state.snapshot()?));

    let tick_state = Arc::clone(&state);
    let tick = TaskHandle::spawn("update tick", move |shutdown| {
        update_tick_task(tick_state, config.tick_period, shutdown)
    });

    let (save_state, save_store) = (Arc::clone(&state), Arc::clone(&store));
    let autosave = TaskHandle::spawn("autosave", move |shutdown| {
        autosave_task(save_state, save_store, config.autosave_period, shutdown)
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = &mut shutdown => break,
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match execute(&state, command).await {
            Ok(Outcome::Continue(Some(message))) => println!("{}", message),
            Ok(Outcome::Continue(None)) => {}
            Ok(Outcome::Quit) => break,
            Err(e) => {
                println!("{}", e);
                error!("Command failed: {}", e);
            }
        }
    }

    autosave.stop().await;
    tick.stop().await;
    state.update_all()?;
    if let Err(e) = save_once(&state, store.as_ref()).await {
        warn!("Final save failed: {}", e);
    }
    printer.stop().await;
    info!("Session ended");
    Ok(())
}
