// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for lingo-bootstrap

use serde::{Deserialize, Serialize};
use std::fmt;

/// Host operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostOs {
    Windows,
    MacOs,
    Linux,
}

impl HostOs {
    /// The OS this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            HostOs::MacOs
        } else if cfg!(target_os = "windows") {
            HostOs::Windows
        } else {
            HostOs::Linux
        }
    }

    pub fn all() -> &'static [HostOs] {
        &[HostOs::Windows, HostOs::MacOs, HostOs::Linux]
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HostOs::Windows => "Windows",
            HostOs::MacOs => "macOS",
            HostOs::Linux => "Linux",
        };
        write!(f, "{}", name)
    }
}

/// Linux distribution family, as far as font installation cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinuxDistro {
    Debian,
    RedHat,
    Unknown,
}

/// A single NVIDIA device reported by the management interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuDevice {
    pub index: usize,
    pub name: String,
}

/// Why the GPU probe concluded there is no usable accelerator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GpuAbsence {
    /// Not probed at all (macOS)
    NotProbed,
    /// Management interface answered but listed no devices
    NoDevices,
    /// Management interface missing or failed to initialize
    DriverUnavailable,
}

/// Outcome of accelerator detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GpuReport {
    Present { devices: Vec<GpuDevice> },
    Absent { reason: GpuAbsence },
}

impl GpuReport {
    pub fn is_present(&self) -> bool {
        matches!(self, GpuReport::Present { .. })
    }

    pub fn devices(&self) -> &[GpuDevice] {
        match self {
            GpuReport::Present { devices } => devices,
            GpuReport::Absent { .. } => &[],
        }
    }
}

/// What to do when the media-processing binary is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaPolicy {
    /// Print install hints and keep going
    #[default]
    Advisory,
    /// Abort the installation
    Strict,
}

/// How a single install step ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum StepOutcome {
    Done,
    Skipped(String),
    Warned(String),
    Failed(String),
}

impl StepOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, StepOutcome::Failed(_))
    }
}

/// Named install step with its outcome, in execution order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: Step,
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Language,
    GpuProbe,
    Runtime,
    Fonts,
    Project,
    Media,
    Launch,
}

/// Everything an install run did, suitable for persisting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallSummary {
    pub created_at: String,
    pub os: HostOs,
    pub display_language: String,
    pub gpu: GpuReport,
    pub runtime_profile: Option<String>,
    pub ffmpeg_available: bool,
    pub dry_run: bool,
    pub steps: Vec<StepRecord>,
}

impl InstallSummary {
    pub fn new(os: HostOs, dry_run: bool) -> Self {
        Self {
            created_at: chrono::Utc::now().to_rfc3339(),
            os,
            display_language: String::new(),
            gpu: GpuReport::Absent {
                reason: GpuAbsence::NotProbed,
            },
            runtime_profile: None,
            ffmpeg_available: false,
            dry_run,
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, step: Step, outcome: StepOutcome) {
        self.steps.push(StepRecord { step, outcome });
    }

    pub fn outcome_of(&self, step: Step) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|record| record.step == step)
            .map(|record| &record.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpu_report_devices_empty_when_absent() {
        let report = GpuReport::Absent {
            reason: GpuAbsence::DriverUnavailable,
        };
        assert!(!report.is_present());
        assert!(report.devices().is_empty());
    }

    #[test]
    fn summary_serializes_step_outcomes() {
        let mut summary = InstallSummary::new(HostOs::Linux, false);
        summary.record(Step::Fonts, StepOutcome::Skipped("container".into()));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["steps"][0]["step"], "fonts");
        assert_eq!(json["steps"][0]["outcome"]["status"], "skipped");
        assert_eq!(json["steps"][0]["outcome"]["detail"], "container");
    }

    #[test]
    fn outcome_of_finds_first_record() {
        let mut summary = InstallSummary::new(HostOs::MacOs, true);
        summary.record(Step::Media, StepOutcome::Warned("missing".into()));
        assert_eq!(
            summary.outcome_of(Step::Media),
            Some(&StepOutcome::Warned("missing".into()))
        );
        assert!(summary.outcome_of(Step::Launch).is_none());
    }
}
