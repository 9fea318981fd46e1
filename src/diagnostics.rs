// SPDX-License-Identifier: PMPL-1.0-or-later

//! Read-only environment report for `lingo-bootstrap check`.
//!
//! Runs the same probes as an install (GPU, FFmpeg, interpreter, pip) but
//! never changes anything, then prints one line per check.

use crate::config::{ConfigStore, DISPLAY_LANGUAGE_KEY};
use crate::i18n::Lang;
use crate::install::{find_python, fonts, gpu, media, select_profile};
use crate::platform::HostContext;
use crate::runner::{CommandRunner, CommandSpec};
use crate::types::{GpuAbsence, GpuReport, HostOs, LinuxDistro};
use anyhow::{anyhow, Result};
use colored::*;
use std::path::Path;

pub fn run_self_diagnostics(
    runner: &dyn CommandRunner,
    host: &HostContext,
    project_dir: &Path,
    python: Option<&Path>,
) -> Result<()> {
    println!("lingo-bootstrap environment check");

    let checks = collect(runner, host, project_dir, python);

    println!();
    for entry in &checks {
        entry.print();
    }

    if checks.iter().any(|entry| entry.level == Level::Error) {
        Err(anyhow!("environment check reported issues"))
    } else {
        Ok(())
    }
}

pub fn collect(
    runner: &dyn CommandRunner,
    host: &HostContext,
    project_dir: &Path,
    python: Option<&Path>,
) -> Vec<Diagnostic> {
    let mut checks = vec![Diagnostic::ok(
        "version",
        format!("lingo-bootstrap {}", env!("CARGO_PKG_VERSION")),
    )];
    checks.push(Diagnostic::ok("host", host.os.to_string()));
    if host.os == HostOs::Linux {
        checks.push(check_distro(host));
    }
    checks.push(check_container(host));

    let gpu_report = gpu::detect_nvidia(runner, host.os);
    let profile = select_profile(host.os, gpu_report.is_present());
    checks.push(check_gpu(&gpu_report));
    checks.push(Diagnostic::ok("runtime profile", profile.name.to_string()));

    checks.push(if media::probe_ffmpeg(runner) {
        Diagnostic::ok("ffmpeg", "ffmpeg -version succeeded".to_string())
    } else {
        Diagnostic::warning("ffmpeg", "not found in PATH".to_string())
    });

    checks.push(check_python(runner, python));
    checks.push(check_config(project_dir));
    checks
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Ok,
    Warn,
    Error,
}

impl Level {
    fn tag(&self) -> ColoredString {
        match self {
            Level::Ok => "OK".green(),
            Level::Warn => "WARN".yellow(),
            Level::Error => "ERR".red().bold(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub label: &'static str,
    pub level: Level,
    pub detail: String,
}

impl Diagnostic {
    fn new(label: &'static str, level: Level, detail: String) -> Self {
        Self {
            label,
            level,
            detail,
        }
    }

    fn ok(label: &'static str, detail: String) -> Self {
        Self::new(label, Level::Ok, detail)
    }

    fn warning(label: &'static str, detail: String) -> Self {
        Self::new(label, Level::Warn, detail)
    }

    fn error(label: &'static str, detail: String) -> Self {
        Self::new(label, Level::Error, detail)
    }

    fn print(&self) {
        println!("  [{:>4}] {:18} {}", self.level.tag(), self.label, self.detail);
    }
}

fn check_distro(host: &HostContext) -> Diagnostic {
    match (host.linux_distro(), fonts::plan(host)) {
        (LinuxDistro::Unknown, _) => Diagnostic::warning(
            "distribution",
            "unrecognized (Noto fonts will not be installed)".to_string(),
        ),
        (distro, fonts::FontPlan::Install { manager, .. }) => {
            Diagnostic::ok("distribution", format!("{:?} (fonts via {})", distro, manager))
        }
        (distro, _) => Diagnostic::ok("distribution", format!("{:?}", distro)),
    }
}

fn check_container(host: &HostContext) -> Diagnostic {
    match (host.in_container(), host.managed_marker()) {
        (_, Some(marker)) => Diagnostic::ok(
            "environment",
            format!("managed ({}), app will not be auto-started", marker),
        ),
        (true, None) => Diagnostic::ok("environment", "container".to_string()),
        (false, None) => Diagnostic::ok("environment", "local".to_string()),
    }
}

fn check_gpu(report: &GpuReport) -> Diagnostic {
    match report {
        GpuReport::Present { devices } => {
            let names: Vec<&str> = devices.iter().map(|device| device.name.as_str()).collect();
            Diagnostic::ok("nvidia gpu", names.join(", "))
        }
        GpuReport::Absent {
            reason: GpuAbsence::NotProbed,
        } => Diagnostic::ok("nvidia gpu", "not probed on macOS".to_string()),
        GpuReport::Absent {
            reason: GpuAbsence::NoDevices,
        } => Diagnostic::warning("nvidia gpu", "driver present, no devices".to_string()),
        GpuReport::Absent {
            reason: GpuAbsence::DriverUnavailable,
        } => Diagnostic::warning("nvidia gpu", "nvidia-smi unavailable".to_string()),
    }
}

fn check_python(runner: &dyn CommandRunner, python: Option<&Path>) -> Diagnostic {
    let python = match python.map(Path::to_path_buf).or_else(find_python) {
        Some(python) => python,
        None => {
            return Diagnostic::error("python", "no python3/python on PATH".to_string());
        }
    };
    let probe = CommandSpec::probe(&python).args(["-m", "pip", "--version"]);
    match runner.run(&probe) {
        Ok(status) if status.success() => {
            let version = status.stdout.lines().next().unwrap_or("").trim().to_string();
            Diagnostic::ok("python", format!("{} ({})", python.display(), version))
        }
        Ok(_) => Diagnostic::error("python", format!("{} has no working pip", python.display())),
        Err(err) => Diagnostic::error("python", format!("{}: {}", python.display(), err)),
    }
}

fn check_config(project_dir: &Path) -> Diagnostic {
    let store = ConfigStore::in_project(project_dir);
    if !store.path().is_file() {
        return Diagnostic::warning(
            "config",
            format!("{} missing (created on install)", store.path().display()),
        );
    }
    match store.load_string(DISPLAY_LANGUAGE_KEY) {
        Ok(Some(code)) => match Lang::from_code(&code) {
            Some(lang) => Diagnostic::ok(
                "display language",
                format!("{} ({})", code, lang.native_name()),
            ),
            None => Diagnostic::warning(
                "display language",
                format!("{} (installer falls back to English)", code),
            ),
        },
        Ok(None) => {
            Diagnostic::warning("display language", "unset (defaults to zh-CN)".to_string())
        }
        Err(err) => Diagnostic::error("config", format!("{:#}", err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::RunStatus;
    use std::fs;
    use tempfile::TempDir;

    struct AllFail;

    impl CommandRunner for AllFail {
        fn run(&self, _spec: &CommandSpec) -> Result<RunStatus> {
            Err(anyhow!("not installed"))
        }

        fn spawn_detached(&self, _spec: &CommandSpec) -> Result<()> {
            Err(anyhow!("not installed"))
        }
    }

    #[test]
    fn broken_python_is_an_error_missing_ffmpeg_a_warning() {
        let dir = TempDir::new().unwrap();
        let host = HostContext::synthetic(HostOs::Windows, dir.path());
        let checks = collect(&AllFail, &host, dir.path(), Some(Path::new("python3")));

        let level_of = |label: &str| checks.iter().find(|c| c.label == label).map(|c| c.level);
        assert_eq!(level_of("python"), Some(Level::Error));
        assert_eq!(level_of("ffmpeg"), Some(Level::Warn));
        assert_eq!(level_of("nvidia gpu"), Some(Level::Warn));
        assert!(level_of("distribution").is_none());
    }

    #[test]
    fn unsupported_language_is_a_warning() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.yaml"), "display_language: ru\n").unwrap();
        let diagnostic = check_config(dir.path());
        assert_eq!(diagnostic.level, Level::Warn);
        assert!(diagnostic.detail.contains("ru"));
    }
}
