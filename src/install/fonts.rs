// SPDX-License-Identifier: PMPL-1.0-or-later

//! Noto font installation for subtitle rendering on Linux hosts.

use crate::console::{Console, Tone};
use crate::platform::HostContext;
use crate::runner::{CommandRunner, CommandSpec};
use crate::types::{HostOs, LinuxDistro, StepOutcome};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontPlan {
    Install {
        manager: &'static str,
        command: CommandSpec,
    },
    Skip(FontSkip),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSkip {
    NotLinux,
    Container,
    UnknownDistro,
}

/// Decide what, if anything, to run. Container detection wins over the
/// distribution check.
pub fn plan(host: &HostContext) -> FontPlan {
    if host.os != HostOs::Linux {
        return FontPlan::Skip(FontSkip::NotLinux);
    }
    if host.in_container() {
        return FontPlan::Skip(FontSkip::Container);
    }
    match host.linux_distro() {
        LinuxDistro::Debian => FontPlan::Install {
            manager: "apt-get",
            command: CommandSpec::new("apt-get").args(["install", "-y", "fonts-noto"]),
        },
        LinuxDistro::RedHat => FontPlan::Install {
            manager: "yum",
            command: CommandSpec::new("yum").args(["install", "-y", "google-noto*"]),
        },
        LinuxDistro::Unknown => FontPlan::Skip(FontSkip::UnknownDistro),
    }
}

/// Run the plan. Failures are reported and swallowed.
pub fn install_fonts(
    runner: &dyn CommandRunner,
    console: &Console,
    host: &HostContext,
) -> StepOutcome {
    match plan(host) {
        FontPlan::Skip(FontSkip::NotLinux) => StepOutcome::Skipped("not linux".into()),
        FontPlan::Skip(FontSkip::Container) => {
            console.note(console.t("fonts.container"), Tone::Cyan);
            StepOutcome::Skipped("container".into())
        }
        FontPlan::Skip(FontSkip::UnknownDistro) => {
            console.note(console.t("fonts.unknown_distro"), Tone::Yellow);
            StepOutcome::Skipped("unrecognized distribution".into())
        }
        FontPlan::Install { manager, command } => match runner.run(&command) {
            Ok(status) if status.success() => {
                console.note(&console.tf("fonts.installed", &[manager]), Tone::Green);
                StepOutcome::Done
            }
            Ok(status) => {
                console.note(&console.tf("fonts.failed", &[manager]), Tone::Yellow);
                StepOutcome::Warned(format!("{} exited with {:?}", manager, status.exit_code))
            }
            Err(err) => {
                debug!(error = %err, manager, "font install could not start");
                console.note(&console.tf("fonts.failed", &[manager]), Tone::Yellow);
                StepOutcome::Warned(format!("{} unavailable", manager))
            }
        },
    }
}
