// SPDX-License-Identifier: PMPL-1.0-or-later

//! Install summary persistence and printing

pub mod output;

use crate::types::{InstallSummary, StepOutcome};
use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::Path;

pub use output::SummaryFormat;

/// Write the summary, format chosen by file extension.
pub fn save_summary(summary: &InstallSummary, path: &Path) -> Result<()> {
    let format = SummaryFormat::from_path(path)?;
    let content = format.serialize(summary)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn load_summary(path: &Path) -> Result<InstallSummary> {
    let format = SummaryFormat::from_path(path)?;
    let content = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    format
        .deserialize(&content)
        .with_context(|| format!("parsing {}", path.display()))
}

/// One line per step, for `--verbose` runs.
pub fn print_steps(summary: &InstallSummary) {
    println!("\n{}", "INSTALL STEPS".bold().yellow());
    for record in &summary.steps {
        let (status, detail) = match &record.outcome {
            StepOutcome::Done => ("done".green(), None),
            StepOutcome::Skipped(why) => ("skipped".cyan(), Some(why)),
            StepOutcome::Warned(why) => ("warning".yellow(), Some(why)),
            StepOutcome::Failed(why) => ("FAILED".red().bold(), Some(why)),
        };
        match detail {
            Some(detail) => println!("  {:?}: {} ({})", record.step, status, detail),
            None => println!("  {:?}: {}", record.step, status),
        }
    }
}
