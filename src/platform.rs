// SPDX-License-Identifier: PMPL-1.0-or-later

//! Host environment snapshot.
//!
//! Every install decision that depends on the machine (OS, distribution
//! marker files, container markers, managed-deployment variables) reads from
//! a [`HostContext`] instead of the live process, so the decisions can be
//! exercised against synthetic hosts in tests.

use crate::types::{HostOs, LinuxDistro};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

/// Set by the Modal platform inside its containers.
pub const MODAL_ENVIRONMENT: &str = "MODAL_ENVIRONMENT";
pub const MODAL_TASK_ID: &str = "MODAL_TASK_ID";
/// Set when something else already owns the Streamlit server.
pub const STREAMLIT_SERVER_PORT: &str = "STREAMLIT_SERVER_PORT";

/// Variables whose presence means the app lifecycle is managed externally.
pub const MANAGED_ENV_MARKERS: &[&str] = &[MODAL_ENVIRONMENT, STREAMLIT_SERVER_PORT, MODAL_TASK_ID];

const DOCKER_MARKER: &str = ".dockerenv";
const DEBIAN_MARKER: &str = "etc/debian_version";
const REDHAT_MARKER: &str = "etc/redhat-release";

#[derive(Debug, Clone)]
pub struct HostContext {
    pub os: HostOs,
    vars: HashMap<String, String>,
    cwd: PathBuf,
    fs_root: PathBuf,
}

impl HostContext {
    /// Snapshot the running process.
    pub fn current() -> Self {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            os: HostOs::current(),
            vars: env::vars().collect(),
            cwd,
            fs_root: PathBuf::from("/"),
        }
    }

    /// An empty host: no variables, cwd and filesystem root at `fs_root`.
    pub fn synthetic(os: HostOs, fs_root: impl Into<PathBuf>) -> Self {
        let fs_root = fs_root.into();
        Self {
            os,
            vars: HashMap::new(),
            cwd: fs_root.clone(),
            fs_root,
        }
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    /// A variable counts as set only when it is non-empty.
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    fn host_path(&self, relative: &str) -> PathBuf {
        self.fs_root.join(relative)
    }

    /// Distribution family from the package-manager marker files.
    pub fn linux_distro(&self) -> LinuxDistro {
        if self.host_path(DEBIAN_MARKER).exists() {
            LinuxDistro::Debian
        } else if self.host_path(REDHAT_MARKER).exists() {
            LinuxDistro::RedHat
        } else {
            LinuxDistro::Unknown
        }
    }

    /// Running inside a container where touching system packages is pointless.
    pub fn in_container(&self) -> bool {
        self.var(MODAL_ENVIRONMENT).is_some() || self.host_path(DOCKER_MARKER).exists()
    }

    /// First managed-deployment marker found, if any.
    ///
    /// A working directory whose path mentions "modal" also counts; Modal
    /// mounts projects under such paths.
    pub fn managed_marker(&self) -> Option<String> {
        if let Some(key) = MANAGED_ENV_MARKERS
            .iter()
            .find(|key| self.var(key).is_some())
        {
            return Some((*key).to_string());
        }
        let cwd = self.cwd.to_string_lossy().to_lowercase();
        if cwd.contains("modal") {
            return Some(format!("cwd {}", self.cwd.display()));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn distro_from_marker_files() {
        let root = TempDir::new().unwrap();
        let host = HostContext::synthetic(HostOs::Linux, root.path());
        assert_eq!(host.linux_distro(), LinuxDistro::Unknown);

        fs::create_dir_all(root.path().join("etc")).unwrap();
        fs::write(root.path().join("etc/redhat-release"), "Fedora").unwrap();
        assert_eq!(host.linux_distro(), LinuxDistro::RedHat);

        fs::write(root.path().join("etc/debian_version"), "12.5").unwrap();
        assert_eq!(host.linux_distro(), LinuxDistro::Debian);
    }

    #[test]
    fn container_from_dockerenv_or_modal() {
        let root = TempDir::new().unwrap();
        let host = HostContext::synthetic(HostOs::Linux, root.path());
        assert!(!host.in_container());

        assert!(host.clone().with_var(MODAL_ENVIRONMENT, "main").in_container());

        fs::write(root.path().join(".dockerenv"), "").unwrap();
        assert!(host.in_container());
    }

    #[test]
    fn empty_variables_are_ignored() {
        let host = HostContext::synthetic(HostOs::Linux, "/nonexistent-root")
            .with_var(MODAL_TASK_ID, "");
        assert!(host.managed_marker().is_none());
    }

    #[test]
    fn each_managed_marker_is_detected() {
        for key in MANAGED_ENV_MARKERS {
            let host =
                HostContext::synthetic(HostOs::Linux, "/nonexistent-root").with_var(key, "1");
            assert_eq!(host.managed_marker().as_deref(), Some(*key));
        }
    }

    #[test]
    fn modal_in_cwd_is_a_marker() {
        let host = HostContext::synthetic(HostOs::Linux, "/nonexistent-root")
            .with_cwd("/root/Modal-Apps/videolingo");
        assert!(host.managed_marker().is_some());
    }
}
