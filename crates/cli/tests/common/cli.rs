//! Runs the `taxsync` binary against a `TestEnv`
//!
//! Output is captured with colour codes stripped, so assertions can match
//! what a user would read.

use crate::common::TestEnv;
use anyhow::{Context, Result};
use std::process::Command;

/// One invocation of the binary, configured for a test environment
pub struct TaxsyncCommand {
    command: Command,
    args: Vec<String>,
}

impl TaxsyncCommand {
    /// Run inside `env.root()` with `TAXSYNC_CONFIG` pointing at its config
    pub fn new(env: &TestEnv) -> Self {
        let mut command = Command::new(env!("CARGO_BIN_EXE_taxsync"));
        command
            .current_dir(env.root())
            .env("TAXSYNC_CONFIG", env.config_path());

        Self {
            command,
            args: Vec::new(),
        }
    }

    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    pub fn run(&mut self) -> Result<CommandResult> {
        let output = self
            .command
            .args(&self.args)
            .output()
            .with_context(|| format!("Failed to run taxsync {:?}", self.args))?;

        Ok(CommandResult {
            stdout: strip_ansi(&String::from_utf8_lossy(&output.stdout)),
            stderr: strip_ansi(&String::from_utf8_lossy(&output.stderr)),
            code: output.status.code(),
        })
    }

    /// Run and require exit status 0
    pub fn assert_success(&mut self) -> Result<CommandResult> {
        let result = self.run()?;
        if !result.success() {
            anyhow::bail!(
                "taxsync {:?} exited with {:?}\n--- stdout\n{}\n--- stderr\n{}",
                self.args,
                result.code,
                result.stdout,
                result.stderr
            );
        }
        Ok(result)
    }

    /// Run and require a non-zero exit status
    pub fn assert_failure(&mut self) -> Result<CommandResult> {
        let result = self.run()?;
        if result.success() {
            anyhow::bail!("taxsync {:?} unexpectedly succeeded\n--- stdout\n{}", self.args, result.stdout);
        }
        Ok(result)
    }
}

/// Captured output of a finished run
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    /// `None` when killed by a signal
    pub code: Option<i32>,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn contains_stdout(&self, text: &str) -> bool {
        self.stdout.contains(text)
    }

    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }
}

/// Remove ANSI escape sequences (`ESC [ ... letter`)
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            if chars.next() == Some('[') {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}

/// `taxsync!(env, "sync", "--from", &dir)` builds a command for `env`
#[macro_export]
macro_rules! taxsync {
    ($env:expr, $($arg:expr),*) => {{
        let mut cmd = $crate::common::cli::TaxsyncCommand::new(&$env);
        cmd.args(&[$($arg),*]);
        cmd
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\u{1b}[1mCAHNRS Units\u{1b}[0m 3 added"), "CAHNRS Units 3 added");
        assert_eq!(strip_ansi("plain"), "plain");
    }
}
