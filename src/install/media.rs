// SPDX-License-Identifier: PMPL-1.0-or-later

//! FFmpeg presence check.
//!
//! The installer never installs FFmpeg itself; it only checks that
//! `ffmpeg -version` runs and, if not, tells the user how to get it. Whether
//! a missing binary stops the run is governed by [`MediaPolicy`].

use crate::console::{Console, Panel, Tone};
use crate::runner::{CommandRunner, CommandSpec};
use crate::types::{HostOs, MediaPolicy, StepOutcome};
use anyhow::{bail, Result};

pub fn version_command() -> CommandSpec {
    CommandSpec::probe("ffmpeg").arg("-version")
}

/// True when `ffmpeg -version` starts and exits cleanly.
pub fn probe_ffmpeg(runner: &dyn CommandRunner) -> bool {
    runner
        .run(&version_command())
        .map(|status| status.success())
        .unwrap_or(false)
}

const WINDOWS_HINT: &[&str] = &["choco install ffmpeg"];
const MACOS_HINT: &[&str] = &["brew install ffmpeg"];
const LINUX_HINT: &[&str] = &[
    "sudo apt install ffmpeg  # Ubuntu/Debian",
    "sudo yum install ffmpeg  # CentOS/RHEL",
];

/// Package-manager command lines and the catalog key of the accompanying note.
pub fn install_hint(os: HostOs) -> (&'static [&'static str], &'static str) {
    match os {
        HostOs::Windows => (WINDOWS_HINT, "media.note_windows"),
        HostOs::MacOs => (MACOS_HINT, "media.note_macos"),
        HostOs::Linux => (LINUX_HINT, "media.note_linux"),
    }
}

pub fn missing_panel(console: &Console, os: HostOs, policy: MediaPolicy) -> Panel {
    let (commands, note_key) = install_hint(os);
    let mut panel = Panel::fit(console.t("media.missing"))
        .line("")
        .line(console.t("media.install_using"));
    for command in commands {
        panel = panel.strong(command);
    }
    panel = panel
        .line("")
        .line(console.t("media.note"))
        .line(console.t(note_key));
    match policy {
        MediaPolicy::Advisory => panel
            .line("")
            .line(console.t("media.continuing"))
            .tone(Tone::Yellow),
        MediaPolicy::Strict => panel.tone(Tone::Red),
    }
}

/// Probe and report. Under [`MediaPolicy::Strict`] a missing binary is an
/// error; otherwise it is a warning and the run goes on.
pub fn check_ffmpeg(
    runner: &dyn CommandRunner,
    console: &Console,
    os: HostOs,
    policy: MediaPolicy,
) -> Result<StepOutcome> {
    if probe_ffmpeg(runner) {
        console.panel(&Panel::new(console.t("media.found")).tone(Tone::Green));
        return Ok(StepOutcome::Done);
    }

    console.panel(&missing_panel(console, os, policy));
    match policy {
        MediaPolicy::Strict => bail!("{}", console.t("media.required")),
        MediaPolicy::Advisory => Ok(StepOutcome::Warned("ffmpeg not found".into())),
    }
}
