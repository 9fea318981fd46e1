// SPDX-License-Identifier: PMPL-1.0-or-later

//! External command execution.
//!
//! Install steps never touch `std::process` directly. They describe the call
//! as a [`CommandSpec`] and hand it to a [`CommandRunner`], which reports the
//! exit status. An `Err` from the runner means the program could not be
//! started at all (typically: not on `PATH`); a started program that fails
//! comes back as `Ok` with a non-success [`RunStatus`].

use anyhow::{Context, Result};
use colored::*;
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub current_dir: Option<PathBuf>,
    /// Read-only probe: output is captured instead of streamed, and the call
    /// is still made in dry-run mode.
    pub probe: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            current_dir: None,
            probe: false,
        }
    }

    pub fn probe(program: impl Into<PathBuf>) -> Self {
        Self {
            probe: true,
            ..Self::new(program)
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Program name without directories, for matching and messages.
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.to_string_lossy().into_owned())
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.env {
            write!(f, "{}={} ", key, value)?;
        }
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            if arg.contains(' ') || arg.contains('*') {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatus {
    pub exit_code: Option<i32>,
    /// Captured stdout; empty unless the spec was a probe.
    pub stdout: String,
}

impl RunStatus {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
        }
    }

    pub fn failed(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            stdout: String::new(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

pub trait CommandRunner {
    /// Run to completion and report the exit status.
    fn run(&self, spec: &CommandSpec) -> Result<RunStatus>;

    /// Start the program and return without waiting for it.
    fn spawn_detached(&self, spec: &CommandSpec) -> Result<()>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, spec: &CommandSpec) -> Result<RunStatus> {
        (**self).run(spec)
    }

    fn spawn_detached(&self, spec: &CommandSpec) -> Result<()> {
        (**self).spawn_detached(spec)
    }
}

/// Runs commands on the real host.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    fn command(spec: &CommandSpec) -> Command {
        let mut command = Command::new(&spec.program);
        command.args(&spec.args);
        for (key, value) in &spec.env {
            command.env(key, value);
        }
        if let Some(dir) = &spec.current_dir {
            command.current_dir(dir);
        }
        command
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<RunStatus> {
        debug!(command = %spec, probe = spec.probe, "running");
        let mut command = Self::command(spec);

        if spec.probe {
            let output = command
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output()
                .with_context(|| format!("starting {}", spec.program.display()))?;
            return Ok(RunStatus {
                exit_code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            });
        }

        let status = command
            .status()
            .with_context(|| format!("starting {}", spec.program.display()))?;
        debug!(command = %spec, code = ?status.code(), "finished");
        Ok(RunStatus {
            exit_code: status.code(),
            stdout: String::new(),
        })
    }

    fn spawn_detached(&self, spec: &CommandSpec) -> Result<()> {
        debug!(command = %spec, "spawning detached");
        let child = Self::command(spec)
            .stdin(Stdio::null())
            .spawn()
            .with_context(|| format!("starting {}", spec.program.display()))?;
        debug!(pid = child.id(), "detached child started");
        Ok(())
    }
}

/// Executes probes for real and only prints everything else.
pub struct DryRunRunner<R: CommandRunner> {
    inner: R,
}

impl<R: CommandRunner> DryRunRunner<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: CommandRunner> CommandRunner for DryRunRunner<R> {
    fn run(&self, spec: &CommandSpec) -> Result<RunStatus> {
        if spec.probe {
            return self.inner.run(spec);
        }
        println!("{} {}", "[dry-run]".dimmed(), spec);
        Ok(RunStatus::ok(""))
    }

    fn spawn_detached(&self, spec: &CommandSpec) -> Result<()> {
        println!("{} {} &", "[dry-run]".dimmed(), spec);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Counting {
        calls: RefCell<Vec<String>>,
    }

    impl CommandRunner for Counting {
        fn run(&self, spec: &CommandSpec) -> Result<RunStatus> {
            self.calls.borrow_mut().push(spec.to_string());
            Ok(RunStatus::ok("probed"))
        }

        fn spawn_detached(&self, spec: &CommandSpec) -> Result<()> {
            self.calls.borrow_mut().push(spec.to_string());
            Ok(())
        }
    }

    #[test]
    fn display_quotes_globs_and_shows_env() {
        let spec = CommandSpec::new("yum")
            .args(["install", "-y", "google-noto*"])
            .env("PIP_NO_CACHE_DIR", "0");
        assert_eq!(spec.to_string(), "PIP_NO_CACHE_DIR=0 yum install -y 'google-noto*'");
    }

    #[test]
    fn dry_run_forwards_only_probes() {
        let runner = DryRunRunner::new(Counting::default());
        let probe = runner
            .run(&CommandSpec::probe("ffmpeg").arg("-version"))
            .unwrap();
        assert_eq!(probe.stdout, "probed");

        let install = runner
            .run(&CommandSpec::new("apt-get").args(["install", "-y", "fonts-noto"]))
            .unwrap();
        assert!(install.success());
        runner
            .spawn_detached(&CommandSpec::new("streamlit"))
            .unwrap();

        assert_eq!(*runner.inner.calls.borrow(), vec!["ffmpeg -version".to_string()]);
    }

    #[test]
    fn program_name_strips_directories() {
        let spec = CommandSpec::new("/usr/bin/python3");
        assert_eq!(spec.program_name(), "python3");
    }

    #[test]
    fn system_runner_reports_missing_program_as_error() {
        let result = SystemRunner.run(&CommandSpec::probe("lingo-bootstrap-no-such-binary"));
        assert!(result.is_err());
    }
}
