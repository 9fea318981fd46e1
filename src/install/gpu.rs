// SPDX-License-Identifier: PMPL-1.0-or-later

//! NVIDIA accelerator detection.
//!
//! Queries the NVIDIA management interface through `nvidia-smi`, which ships
//! with the driver and wraps NVML. Any failure to talk to it is read as "no
//! accelerator": the installer then falls back to the CPU runtime instead of
//! aborting.

use crate::console::{Console, Panel, Tone};
use crate::runner::{CommandRunner, CommandSpec};
use crate::types::{GpuAbsence, GpuDevice, GpuReport, HostOs};
use tracing::debug;

pub fn query_command() -> CommandSpec {
    CommandSpec::probe("nvidia-smi").args(["--query-gpu=name", "--format=csv,noheader"])
}

/// Probe for NVIDIA devices. Never fails; errors map to [`GpuReport::Absent`].
pub fn detect_nvidia(runner: &dyn CommandRunner, os: HostOs) -> GpuReport {
    if os == HostOs::MacOs {
        return GpuReport::Absent {
            reason: GpuAbsence::NotProbed,
        };
    }

    let status = match runner.run(&query_command()) {
        Ok(status) => status,
        Err(err) => {
            debug!(error = %err, "nvidia-smi unavailable");
            return GpuReport::Absent {
                reason: GpuAbsence::DriverUnavailable,
            };
        }
    };
    if !status.success() {
        debug!(code = ?status.exit_code, "nvidia-smi failed to initialize");
        return GpuReport::Absent {
            reason: GpuAbsence::DriverUnavailable,
        };
    }

    let devices = parse_device_list(&status.stdout);
    if devices.is_empty() {
        GpuReport::Absent {
            reason: GpuAbsence::NoDevices,
        }
    } else {
        GpuReport::Present { devices }
    }
}

/// One device name per non-empty line, indexed in order.
pub fn parse_device_list(stdout: &str) -> Vec<GpuDevice> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(index, name)| GpuDevice {
            index,
            name: name.to_string(),
        })
        .collect()
}

pub fn announce(console: &Console, report: &GpuReport) {
    match report {
        GpuReport::Present { devices } => {
            let mut panel = Panel::fit(console.t("gpu.detected")).tone(Tone::Green);
            for device in devices {
                panel = panel.line(&format!("GPU {}: {}", device.index, device.name));
            }
            console.panel(&panel);
        }
        GpuReport::Absent {
            reason: GpuAbsence::NoDevices,
        } => console.note(console.t("gpu.none"), Tone::Yellow),
        GpuReport::Absent {
            reason: GpuAbsence::DriverUnavailable,
        } => console.note(console.t("gpu.driver_missing"), Tone::Yellow),
        GpuReport::Absent {
            reason: GpuAbsence::NotProbed,
        } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_skips_blank_lines() {
        let devices = parse_device_list("NVIDIA GeForce RTX 4090\n\n  Tesla T4  \n");
        assert_eq!(
            devices,
            vec![
                GpuDevice {
                    index: 0,
                    name: "NVIDIA GeForce RTX 4090".into()
                },
                GpuDevice {
                    index: 1,
                    name: "Tesla T4".into()
                },
            ]
        );
    }

    #[test]
    fn empty_output_has_no_devices() {
        assert!(parse_device_list("").is_empty());
        assert!(parse_device_list("\n  \n").is_empty());
    }

    #[test]
    fn query_is_a_probe() {
        let spec = query_command();
        assert!(spec.probe);
        assert_eq!(spec.program_name(), "nvidia-smi");
    }
}
