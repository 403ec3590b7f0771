//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::{
    services::{default_working_dir, TriggerAction, DEFAULT_SHELL},
    state::DEFAULT_INITIAL_SECONDS,
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "trapdoor")]
#[command(about = "A dead-man's-switch countdown server that runs a script when time runs out")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "5001")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Initial countdown duration in seconds
    #[arg(short, long, default_value_t = DEFAULT_INITIAL_SECONDS)]
    pub time: u64,

    /// Script executed when the countdown reaches zero
    #[arg(short, long, default_value = "on_complete.sh")]
    pub script: PathBuf,

    /// Interpreter used to run the script
    #[arg(long, default_value = DEFAULT_SHELL)]
    pub shell: String,

    /// Working directory for the script (defaults to the script's directory)
    #[arg(short, long)]
    pub workdir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Directory the trigger script runs in
    pub fn working_dir(&self) -> PathBuf {
        self.workdir
            .clone()
            .unwrap_or_else(|| default_working_dir(&self.script))
    }

    /// Build the action fired when the countdown reaches zero
    pub fn trigger_action(&self) -> TriggerAction {
        TriggerAction::new(&self.script)
            .with_shell(&self.shell)
            .with_working_dir(self.working_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_setup() {
        let config = Config::try_parse_from(["trapdoor"]).unwrap();
        assert_eq!(config.address(), "0.0.0.0:5001");
        assert_eq!(config.time, 60);
        assert_eq!(config.log_level(), "info");

        let action = config.trigger_action();
        assert_eq!(action.shell, "bash");
        assert_eq!(action.script, PathBuf::from("on_complete.sh"));
        assert_eq!(action.working_dir, PathBuf::from("."));
    }

    #[test]
    fn workdir_follows_script_unless_overridden() {
        let config =
            Config::try_parse_from(["trapdoor", "--script", "/srv/trap/fire.sh", "-v"]).unwrap();
        assert_eq!(config.working_dir(), PathBuf::from("/srv/trap"));
        assert_eq!(config.log_level(), "debug");

        let config = Config::try_parse_from([
            "trapdoor",
            "--script",
            "/srv/trap/fire.sh",
            "--workdir",
            "/tmp",
        ])
        .unwrap();
        assert_eq!(config.working_dir(), PathBuf::from("/tmp"));
    }

    #[test]
    fn negative_time_is_rejected() {
        assert!(Config::try_parse_from(["trapdoor", "--time", "-5"]).is_err());
    }
}
