// SPDX-License-Identifier: PMPL-1.0-or-later

//! PyTorch runtime selection.
//!
//! Which wheel set gets installed is a pure function of the host OS and
//! whether an NVIDIA device answered the probe. The mapping is kept as a
//! table so every combination is visible in one place.

use crate::console::{Console, Panel, Tone};
use crate::runner::{CommandRunner, CommandSpec};
use crate::types::HostOs;
use anyhow::{bail, Result};
use std::path::Path;

#[derive(Debug, PartialEq, Eq)]
pub struct RuntimeProfile {
    pub name: &'static str,
    pub packages: &'static [&'static str],
    /// Dedicated wheel index; `None` means the default (or configured) PyPI.
    pub index_url: Option<&'static str>,
    /// Catalog key of the panel announcing the install.
    pub message_key: &'static str,
}

pub const CUDA_118: RuntimeProfile = RuntimeProfile {
    name: "cuda-11.8",
    packages: &["torch==2.0.0", "torchaudio==2.0.0"],
    index_url: Some("https://download.pytorch.org/whl/cu118"),
    message_key: "runtime.cuda",
};

pub const CPU: RuntimeProfile = RuntimeProfile {
    name: "cpu",
    packages: &["torch==2.1.2", "torchaudio==2.1.2"],
    index_url: None,
    message_key: "runtime.cpu_no_gpu",
};

pub const CPU_MACOS: RuntimeProfile = RuntimeProfile {
    name: "cpu-macos",
    packages: &["torch==2.1.2", "torchaudio==2.1.2"],
    index_url: None,
    message_key: "runtime.cpu_macos",
};

/// (host, accelerator present) → profile. macOS is never probed, but both of
/// its rows are listed so the table is total.
const RUNTIME_TABLE: &[(HostOs, bool, &RuntimeProfile)] = &[
    (HostOs::Linux, true, &CUDA_118),
    (HostOs::Linux, false, &CPU),
    (HostOs::Windows, true, &CUDA_118),
    (HostOs::Windows, false, &CPU),
    (HostOs::MacOs, true, &CPU_MACOS),
    (HostOs::MacOs, false, &CPU_MACOS),
];

pub fn select_profile(os: HostOs, has_gpu: bool) -> &'static RuntimeProfile {
    RUNTIME_TABLE
        .iter()
        .find(|(row_os, row_gpu, _)| *row_os == os && *row_gpu == has_gpu)
        .map(|(_, _, profile)| *profile)
        .unwrap_or(&CPU)
}

/// `<python> -m pip install`
pub fn pip_install(python: &Path) -> CommandSpec {
    CommandSpec::new(python).args(["-m", "pip", "install"])
}

/// The mirror only applies to profiles that use the default index; CUDA
/// wheels must come from their own index.
pub fn install_command(
    python: &Path,
    profile: &RuntimeProfile,
    mirror: Option<&str>,
) -> CommandSpec {
    let spec = pip_install(python).args(profile.packages.iter().copied());
    match profile.index_url.or(mirror) {
        Some(url) => spec.args(["--index-url", url]),
        None => spec,
    }
}

pub fn install_runtime(
    runner: &dyn CommandRunner,
    console: &Console,
    python: &Path,
    profile: &RuntimeProfile,
    mirror: Option<&str>,
) -> Result<()> {
    console.panel(&Panel::new(console.t(profile.message_key)).tone(Tone::Cyan));
    let spec = install_command(python, profile, mirror);
    let status = runner.run(&spec)?;
    if !status.success() {
        bail!(
            "{}: `{}` exited with {:?}",
            console.t("runtime.failed"),
            spec,
            status.exit_code
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_host() {
        for os in HostOs::all() {
            for gpu in [true, false] {
                assert!(
                    RUNTIME_TABLE.iter().any(|(o, g, _)| o == os && *g == gpu),
                    "missing row for {:?}/{}",
                    os,
                    gpu
                );
            }
        }
    }

    #[test]
    fn cuda_command_keeps_its_own_index_over_mirror() {
        let spec =
            install_command(Path::new("python3"), &CUDA_118, Some("https://mirror.example/simple"));
        assert_eq!(
            spec.args,
            vec![
                "-m",
                "pip",
                "install",
                "torch==2.0.0",
                "torchaudio==2.0.0",
                "--index-url",
                "https://download.pytorch.org/whl/cu118"
            ]
        );
    }

    #[test]
    fn cpu_command_uses_mirror_when_configured() {
        let plain = install_command(Path::new("python3"), &CPU, None);
        assert_eq!(plain.args, vec!["-m", "pip", "install", "torch==2.1.2", "torchaudio==2.1.2"]);

        let mirrored =
            install_command(Path::new("python3"), &CPU, Some("https://mirror.example/simple"));
        assert_eq!(
            &mirrored.args[5..],
            &["--index-url".to_string(), "https://mirror.example/simple".to_string()]
        );
    }
}
