// SPDX-License-Identifier: PMPL-1.0-or-later

//! Editable install of the Python project itself.

use crate::console::{Console, Panel, Tone};
use crate::install::runtime::pip_install;
use crate::runner::{CommandRunner, CommandSpec};
use anyhow::{anyhow, Result};
use std::path::Path;

/// `<python> -m pip install -e .` run from the project directory.
pub fn editable_install_command(
    python: &Path,
    project_dir: &Path,
    mirror: Option<&str>,
) -> CommandSpec {
    let spec = pip_install(python)
        .args(["-e", "."])
        .env("PIP_NO_CACHE_DIR", "0")
        .env("PYTHONIOENCODING", "utf-8")
        .current_dir(project_dir);
    match mirror {
        Some(url) => spec.args(["--index-url", url]),
        None => spec,
    }
}

/// Install the project; any failure is fatal and reported in a red panel.
pub fn install_project(
    runner: &dyn CommandRunner,
    console: &Console,
    python: &Path,
    project_dir: &Path,
    mirror: Option<&str>,
) -> Result<()> {
    console.panel(&Panel::new(console.t("project.installing")).tone(Tone::Cyan));
    let spec = editable_install_command(python, project_dir, mirror);

    let failure = match runner.run(&spec) {
        Ok(status) if status.success() => return Ok(()),
        Ok(status) => anyhow!("`{}` exited with {:?}", spec, status.exit_code),
        Err(err) => err,
    };
    let failure = failure.context(console.t("project.failed"));
    console.panel(&Panel::fit(&format!("{:#}", failure)).tone(Tone::Red));
    Err(failure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editable_install_sets_pip_environment() {
        let spec =
            editable_install_command(Path::new("/usr/bin/python3"), Path::new("/srv/app"), None);
        assert_eq!(spec.args, vec!["-m", "pip", "install", "-e", "."]);
        assert!(spec.env.contains(&("PIP_NO_CACHE_DIR".to_string(), "0".to_string())));
        assert!(spec.env.contains(&("PYTHONIOENCODING".to_string(), "utf-8".to_string())));
        assert_eq!(spec.current_dir.as_deref(), Some(Path::new("/srv/app")));
    }
}
