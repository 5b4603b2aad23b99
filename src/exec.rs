//! Process execution seam.
//!
//! The installer only depends on the narrow [`CommandRunner`] and
//! [`CommandProbe`] traits so tests can substitute recording fakes.

use anyhow::{Context, Result};
use duct::cmd;

/// Captured result of an external command. A non-zero exit status is data
/// here, not an error; `Err` is reserved for spawn failures.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }

    /// Stdout and stderr concatenated, for surfacing failure output.
    pub fn combined(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

/// Checks whether a command binary exists on PATH.
pub trait CommandProbe {
    fn has(&self, command: &str) -> bool;
}

/// Production runner backed by duct. Blocks until the command exits and
/// captures both output streams.
#[derive(Debug, Default, Clone, Copy)]
pub struct DuctRunner;

impl CommandRunner for DuctRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let output = cmd(program, args)
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()
            .with_context(|| format!("Failed to spawn {}", program))?;

        Ok(CommandOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// PATH lookup via the which crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathProbe;

impl CommandProbe for PathProbe {
    fn has(&self, command: &str) -> bool {
        which::which(command).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_merges_both_streams() {
        let output = CommandOutput {
            status: 1,
            stdout: "out".to_string(),
            stderr: "err".to_string(),
        };
        assert_eq!(output.combined(), "out\nerr");
    }

    #[test]
    fn combined_skips_empty_streams() {
        let output = CommandOutput {
            status: 0,
            stdout: String::new(),
            stderr: "only err".to_string(),
        };
        assert_eq!(output.combined(), "only err");

        let output = CommandOutput {
            status: 0,
            stdout: "only out".to_string(),
            stderr: String::new(),
        };
        assert_eq!(output.combined(), "only out");
    }

    #[test]
    fn success_follows_exit_status() {
        assert!(CommandOutput::default().success());
        assert!(
            !CommandOutput {
                status: 127,
                ..Default::default()
            }
            .success()
        );
    }
}
