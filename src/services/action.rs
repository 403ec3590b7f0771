//! External trigger action: the script executed when the countdown hits zero

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    process::Stdio,
};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::state::TriggerOutcome;

/// Default interpreter used to run the trigger script
pub const DEFAULT_SHELL: &str = "bash";

/// A script run through a shell with a fixed working directory
#[derive(Debug, Clone)]
pub struct TriggerAction {
    pub shell: String,
    pub script: PathBuf,
    pub working_dir: PathBuf,
}

impl TriggerAction {
    /// Run `script` with bash from the script's own directory
    pub fn new(script: impl Into<PathBuf>) -> Self {
        let script = script.into();
        let working_dir = default_working_dir(&script);
        Self {
            shell: DEFAULT_SHELL.to_string(),
            script,
            working_dir,
        }
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn with_working_dir(mut self, working_dir: impl Into<PathBuf>) -> Self {
        self.working_dir = working_dir.into();
        self
    }

    /// Whether the script file currently exists
    pub fn script_exists(&self) -> bool {
        self.script.is_file()
    }

    /// Execute the script to completion and describe how it went.
    ///
    /// Never fails: every problem is folded into the returned outcome.
    pub async fn run(&self) -> TriggerOutcome {
        let script = self.script.display();

        if !self.script_exists() {
            warn!("Trigger script {} not found", script);
            return TriggerOutcome::failed(format!("{} not found", script));
        }

        debug!("Running trigger script {} in {}", script, self.working_dir.display());

        let output = Command::new(&self.shell)
            .arg(&self.script)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .output()
            .await;

        let output = match output {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Could not launch {} for {}: {}", self.shell, script, e);
                return TriggerOutcome::failed(format!("{} not found", self.shell));
            }
            Err(e) => {
                warn!("Failed to run {}: {}", script, e);
                return TriggerOutcome::failed(format!("Failed to run {}: {}", script, e));
            }
        };

        if output.status.success() {
            info!("Trigger script {} completed successfully", script);
            return TriggerOutcome::succeeded();
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let reason = [stderr.trim(), stdout.trim()]
            .into_iter()
            .find(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| output.status.to_string());

        warn!("Trigger script {} failed: {}", script, reason);
        TriggerOutcome::failed(format!("Script failed: {}", reason))
    }
}

/// Directory containing `script`, or `.` for a bare file name
pub fn default_working_dir(script: &Path) -> PathBuf {
    match script.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
