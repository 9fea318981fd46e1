// SPDX-License-Identifier: PMPL-1.0-or-later

//! Completion panels and hand-off to the web application.

use crate::console::{Console, Panel, Tone};
use crate::platform::HostContext;
use crate::runner::{CommandRunner, CommandSpec};
use crate::types::StepOutcome;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchDecision {
    Launch(CommandSpec),
    /// A managed-environment marker was found; the platform starts the app.
    Managed(String),
    /// Turned off by flag or config.
    Disabled,
}

/// `app_command` is program followed by its arguments; an empty command
/// disables the launch.
pub fn decide(
    host: &HostContext,
    enabled: bool,
    app_command: &[String],
    project_dir: &Path,
) -> LaunchDecision {
    if let Some(marker) = host.managed_marker() {
        return LaunchDecision::Managed(marker);
    }
    match app_command.split_first() {
        Some((program, args)) if enabled => LaunchDecision::Launch(
            CommandSpec::new(program.as_str())
                .args(args.iter().cloned())
                .current_dir(project_dir),
        ),
        _ => LaunchDecision::Disabled,
    }
}

pub fn print_completion(console: &Console, app_command: &[String], rerun_hint: &str) {
    let command_line = app_command.join(" ");
    let done = Panel::new(console.t("done.title"))
        .line("")
        .line(console.t("done.run_command"))
        .strong(&command_line)
        .line(console.t("done.first_start"))
        .tone(Tone::BoldGreen);
    console.panel(&done);

    let trouble = Panel::new(console.t("trouble.title"))
        .line(&format!("1. {}", console.t("trouble.network")))
        .line(&format!("2. {}", console.tf("trouble.rerun", &[rerun_hint])))
        .tone(Tone::Yellow);
    console.panel(&trouble);
}

/// Act on the decision. A launch that cannot start is a warning; the install
/// itself already succeeded.
pub fn launch(
    runner: &dyn CommandRunner,
    console: &Console,
    decision: &LaunchDecision,
) -> StepOutcome {
    match decision {
        LaunchDecision::Managed(marker) => {
            debug!(marker = %marker, "managed environment");
            console.panel(&Panel::new(console.t("launch.managed")).tone(Tone::Cyan));
            console.panel(&Panel::new(console.t("launch.managed_done")).tone(Tone::Green));
            StepOutcome::Skipped(format!("managed environment ({})", marker))
        }
        LaunchDecision::Disabled => StepOutcome::Skipped("disabled".into()),
        LaunchDecision::Launch(spec) => match runner.spawn_detached(spec) {
            Ok(()) => StepOutcome::Done,
            Err(err) => {
                let reason = format!("{:#}", err);
                let text = console.tf("launch.failed", &[reason.as_str()]);
                console.panel(&Panel::fit(&text).tone(Tone::Yellow));
                StepOutcome::Warned(err.to_string())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MODAL_ENVIRONMENT, STREAMLIT_SERVER_PORT};
    use crate::types::HostOs;

    fn streamlit() -> Vec<String> {
        vec!["streamlit".into(), "run".into(), "st.py".into()]
    }

    #[test]
    fn plain_host_launches_streamlit() {
        let host = HostContext::synthetic(HostOs::Linux, "/srv");
        match decide(&host, true, &streamlit(), Path::new("/srv/app")) {
            LaunchDecision::Launch(spec) => {
                assert_eq!(spec.program_name(), "streamlit");
                assert_eq!(spec.args, vec!["run", "st.py"]);
            }
            other => panic!("expected launch, got {:?}", other),
        }
    }

    #[test]
    fn managed_marker_wins_over_enabled_flag() {
        let host =
            HostContext::synthetic(HostOs::Linux, "/srv").with_var(STREAMLIT_SERVER_PORT, "8501");
        assert_eq!(
            decide(&host, true, &streamlit(), Path::new("/srv")),
            LaunchDecision::Managed(STREAMLIT_SERVER_PORT.to_string())
        );
        let host =
            HostContext::synthetic(HostOs::Linux, "/srv").with_var(MODAL_ENVIRONMENT, "main");
        assert!(matches!(
            decide(&host, false, &streamlit(), Path::new("/srv")),
            LaunchDecision::Managed(_)
        ));
    }

    #[test]
    fn disabled_or_empty_command_does_not_launch() {
        let host = HostContext::synthetic(HostOs::Linux, "/srv");
        assert_eq!(decide(&host, false, &streamlit(), Path::new("/srv")), LaunchDecision::Disabled);
        assert_eq!(decide(&host, true, &[], Path::new("/srv")), LaunchDecision::Disabled);
    }
}
