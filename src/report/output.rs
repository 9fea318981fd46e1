// SPDX-License-Identifier: PMPL-1.0-or-later

//! Serialization helpers for install summaries

use crate::types::InstallSummary;
use anyhow::{anyhow, Result};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryFormat {
    Json,
    Yaml,
}

impl SummaryFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Some(SummaryFormat::Json),
            "yaml" | "yml" => Some(SummaryFormat::Yaml),
            _ => None,
        }
    }

    /// Extension-based dispatch; anything else is rejected rather than guessed.
    pub fn from_path(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::parse)
            .ok_or_else(|| {
                anyhow!(
                    "unsupported summary extension for {} (use .json, .yaml or .yml)",
                    path.display()
                )
            })
    }

    pub fn serialize(&self, summary: &InstallSummary) -> Result<String> {
        match self {
            SummaryFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
            SummaryFormat::Yaml => Ok(serde_yaml::to_string(summary)?),
        }
    }

    pub fn deserialize(&self, content: &str) -> Result<InstallSummary> {
        match self {
            SummaryFormat::Json => Ok(serde_json::from_str(content)?),
            SummaryFormat::Yaml => Ok(serde_yaml::from_str(content)?),
        }
    }
}
