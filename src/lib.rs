// SPDX-License-Identifier: PMPL-1.0-or-later

//! lingo-bootstrap — environment bootstrapper for the subtitle web app.
//!
//! Prepares a machine to run the Streamlit application in one pass: probes
//! for an NVIDIA accelerator, installs the matching PyTorch build, installs
//! Noto fonts on Linux, performs an editable install of the project, checks
//! for FFmpeg, and finally starts the app as a detached process unless the
//! host is a managed deployment.
//!
//! BUILDING BLOCKS:
//! 1. **Runner**: every external program goes through [`runner::CommandRunner`],
//!    so install steps can be replayed against scripted hosts.
//! 2. **Platform**: [`platform::HostContext`] snapshots the OS, environment
//!    variables, and marker files that drive the branching.
//! 3. **Install**: one module per step, orchestrated by [`install::Installer`].

pub mod config;
pub mod console;
pub mod diagnostics;
pub mod i18n;
pub mod install;
pub mod platform;
pub mod report;
pub mod runner;
pub mod types;
