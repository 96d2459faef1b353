//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};
use clap::{Parser, Subcommand};

use crate::ui::SessionConfig;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "timesheet")]
#[command(about = "Multi-timer stopwatch with hourly billing and autosave")]
#[command(version)]
pub struct Config {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Mode,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Mode {
    /// Serve the timer document and the public directory over HTTP
    Serve {
        /// Port to bind the server to
        #[arg(short, long, default_value = "3100")]
        port: u16,

        /// Host address to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Directory holding static files and timers.json
        #[arg(long, default_value = "public")]
        public_dir: PathBuf,
    },

    /// Run a timer session in the terminal, autosaving to a server
    Run {
        /// Base URL of the storage server
        #[arg(short, long, default_value = "http://localhost:3100")]
        server: String,

        /// Seconds between autosaves
        #[arg(long, default_value = "5")]
        autosave_secs: u64,

        /// Milliseconds between display updates
        #[arg(long, default_value = "100")]
        tick_ms: u64,
    },
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Session timings from the `run` flags; zero periods are clamped
pub fn session_config(autosave_secs: u64, tick_ms: u64) -> SessionConfig {
    SessionConfig {
        autosave_period: Duration::from_secs(autosave_secs.max(1)),
        tick_period: Duration::from_millis(tick_ms.max(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_defaults() {
        let config = Config::try_parse_from(["timesheet", "serve"]).unwrap();
        assert!(!config.verbose);
        assert_eq!(
            config.command,
            Mode::Serve {
                port: 3100,
                host: "0.0.0.0".to_string(),
                public_dir: PathBuf::from("public"),
            }
        );
    }

    #[test]
    fn test_run_defaults() {
        let config = Config::try_parse_from(["timesheet", "run", "-v"]).unwrap();
        assert_eq!(config.log_level(), "debug");
        assert_eq!(
            config.command,
            Mode::Run {
                server: "http://localhost:3100".to_string(),
                autosave_secs: 5,
                tick_ms: 100,
            }
        );
    }

    #[test]
    fn test_session_config() {
        let session = session_config(5, 100);
        assert_eq!(session.autosave_period, Duration::from_secs(5));
        assert_eq!(session.tick_period, Duration::from_millis(100));

        let clamped = session_config(0, 0);
        assert_eq!(clamped.autosave_period, Duration::from_secs(1));
        assert_eq!(clamped.tick_period, Duration::from_millis(1));
    }
}
