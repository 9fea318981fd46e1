// SPDX-License-Identifier: PMPL-1.0-or-later

//! Install orchestration.
//!
//! Runs the steps strictly in order: banner, language, mirror notice, GPU
//! probe, PyTorch runtime, fonts (Linux), editable project install, FFmpeg
//! check, completion panels, application launch. Only the GPU flag and the
//! display language flow between steps.

pub mod fonts;
pub mod gpu;
pub mod launch;
pub mod media;
pub mod project;
pub mod runtime;

use crate::config::{ConfigStore, InstallerSettings, DISPLAY_LANGUAGE_KEY};
use crate::console::{Console, Panel, Tone};
use crate::i18n::{Lang, DEFAULT_LANGUAGE};
use crate::platform::HostContext;
use crate::runner::CommandRunner;
use crate::types::{GpuAbsence, GpuReport, InstallSummary, MediaPolicy, Step, StepOutcome};
use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};
use unicode_width::UnicodeWidthStr;

pub use launch::LaunchDecision;
pub use runtime::{select_profile, RuntimeProfile};

pub const ASCII_LOGO: &str = r"
__     ___     _            _     _
\ \   / (_) __| | ___  ___ | |   (_)_ __   __ _  ___
 \ \ / /| |/ _` |/ _ \/ _ \| |   | | '_ \ / _` |/ _ \
  \ V / | | (_| |  __/ (_) | |___| | | | | (_| | (_) |
   \_/  |_|\__,_|\___|\___/|_____|_|_| |_|\__, |\___/
                                          |___/
";

const DEFAULT_LANGUAGE_NOTICE: &str = "🌏 默认语言设置为中文 / Default language set to Chinese";
const RERUN_HINT: &str = "lingo-bootstrap";
const PYTHON_CANDIDATES: &[&str] = &["python3", "python"];

/// Command-line choices; `None` defers to `config.yaml`.
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    pub project_dir: PathBuf,
    pub python: Option<PathBuf>,
    pub media_policy: Option<MediaPolicy>,
    pub no_launch: bool,
    pub dry_run: bool,
}

pub struct Installer<R: CommandRunner> {
    runner: R,
    host: HostContext,
    store: ConfigStore,
    settings: InstallerSettings,
    options: InstallOptions,
    console: Console,
    summary: InstallSummary,
}

impl<R: CommandRunner> Installer<R> {
    pub fn new(runner: R, host: HostContext, options: InstallOptions) -> Result<Self> {
        let store = ConfigStore::in_project(&options.project_dir);
        let settings = store.installer_settings()?;
        let summary = InstallSummary::new(host.os, options.dry_run);
        Ok(Self {
            runner,
            host,
            store,
            settings,
            options,
            console: Console::new(Lang::default()),
            summary,
        })
    }

    /// Replace the console, e.g. to pin the width.
    pub fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    pub fn summary(&self) -> &InstallSummary {
        &self.summary
    }

    fn media_policy(&self) -> MediaPolicy {
        self.options
            .media_policy
            .unwrap_or_else(|| self.settings.media_policy())
    }

    fn mirror(&self) -> Option<&str> {
        self.settings
            .pip_mirror
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Run every step. On a fatal error the summary still holds the steps
    /// that completed plus the failing one.
    pub fn run(&mut self) -> Result<()> {
        self.print_banner();
        self.resolve_language()?;

        self.console
            .panel(&Panel::fit(self.console.t("install.start")).tone(Tone::BoldMagenta));
        self.print_mirror_notice();

        let python = match self.resolve_python() {
            Ok(python) => python,
            Err(err) => {
                self.summary.record(Step::Runtime, StepOutcome::Failed(err.to_string()));
                return Err(err);
            }
        };
        info!(python = %python.display(), "using interpreter");

        let report = gpu::detect_nvidia(&self.runner, self.host.os);
        gpu::announce(&self.console, &report);
        let has_gpu = report.is_present();
        let probe_outcome = match report {
            GpuReport::Absent {
                reason: GpuAbsence::NotProbed,
            } => StepOutcome::Skipped(format!("not probed on {}", self.host.os)),
            _ => StepOutcome::Done,
        };
        self.summary.gpu = report;
        self.summary.record(Step::GpuProbe, probe_outcome);

        let profile = select_profile(self.host.os, has_gpu);
        self.summary.runtime_profile = Some(profile.name.to_string());
        let mirror = self.mirror().map(str::to_string);
        let result = runtime::install_runtime(
            &self.runner,
            &self.console,
            &python,
            profile,
            mirror.as_deref(),
        );
        self.track(Step::Runtime, result)?;

        let outcome = fonts::install_fonts(&self.runner, &self.console, &self.host);
        self.summary.record(Step::Fonts, outcome);

        let result = project::install_project(
            &self.runner,
            &self.console,
            &python,
            &self.options.project_dir,
            mirror.as_deref(),
        );
        self.track(Step::Project, result)?;

        let result =
            media::check_ffmpeg(&self.runner, &self.console, self.host.os, self.media_policy());
        let media_outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                self.summary.record(Step::Media, StepOutcome::Failed(err.to_string()));
                return Err(err);
            }
        };
        self.summary.ffmpeg_available = media_outcome == StepOutcome::Done;
        if !self.summary.ffmpeg_available {
            self.console
                .panel(&Panel::new(self.console.t("media.final_warning")).tone(Tone::Yellow));
        }
        self.summary.record(Step::Media, media_outcome);

        self.finish();
        Ok(())
    }

    fn track(&mut self, step: Step, result: Result<()>) -> Result<()> {
        match result {
            Ok(()) => {
                self.summary.record(step, StepOutcome::Done);
                Ok(())
            }
            Err(err) => {
                self.summary.record(step, StepOutcome::Failed(format!("{:#}", err)));
                Err(err)
            }
        }
    }

    fn print_banner(&self) {
        let width = ASCII_LOGO.lines().map(|line| line.width()).max().unwrap_or(0) + 4;
        let banner = Panel::new(ASCII_LOGO.trim_matches('\n'))
            .double()
            .title("🌏")
            .width(width)
            .border_tone(Tone::BrightBlue);
        self.console.panel(&banner);
    }

    /// Load the persisted display language, seeding the default on first run.
    fn resolve_language(&mut self) -> Result<()> {
        let code = match self.store.load_string(DISPLAY_LANGUAGE_KEY)? {
            Some(code) => code,
            None => {
                let code = DEFAULT_LANGUAGE.code().to_string();
                if !self.options.dry_run {
                    self.store
                        .update_key(DISPLAY_LANGUAGE_KEY, code.as_str())
                        .context("saving default display language")?;
                }
                self.console
                    .panel(&Panel::new(DEFAULT_LANGUAGE_NOTICE).tone(Tone::Cyan));
                code
            }
        };

        let lang = Lang::from_code(&code).unwrap_or_else(|| {
            warn!(language = %code, "no installer translation, using English");
            Lang::En
        });
        self.console.set_lang(lang);
        self.summary.display_language = code;
        self.summary.record(Step::Language, StepOutcome::Done);
        Ok(())
    }

    fn print_mirror_notice(&self) {
        let text = match self.mirror() {
            Some(url) => self.console.tf("mirror.custom", &[url]),
            None => self.console.t("mirror.default").to_string(),
        };
        self.console.panel(&Panel::new(&text).tone(Tone::Cyan));
    }

    fn resolve_python(&self) -> Result<PathBuf> {
        if let Some(python) = self.options.python.as_ref().or(self.settings.python.as_ref()) {
            return Ok(python.clone());
        }
        find_python().ok_or_else(|| {
            anyhow!(
                "no Python interpreter found on PATH (tried {})",
                PYTHON_CANDIDATES.join(", ")
            )
        })
    }

    fn finish(&mut self) {
        let app_command = self.settings.app_command.clone();
        launch::print_completion(&self.console, &app_command, RERUN_HINT);

        let enabled = self.settings.auto_launch && !self.options.no_launch;
        let decision = launch::decide(&self.host, enabled, &app_command, &self.options.project_dir);
        if decision == LaunchDecision::Disabled {
            let command_line = app_command.join(" ");
            self.console.note(
                &self.console.tf("launch.disabled", &[command_line.as_str()]),
                Tone::Cyan,
            );
        }
        let outcome = launch::launch(&self.runner, &self.console, &decision);
        self.summary.record(Step::Launch, outcome);
    }
}

/// First interpreter from [`PYTHON_CANDIDATES`] found on `PATH`.
pub fn find_python() -> Option<PathBuf> {
    PYTHON_CANDIDATES
        .iter()
        .find_map(|candidate| which::which(candidate).ok())
}
