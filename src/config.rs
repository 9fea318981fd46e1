// SPDX-License-Identifier: PMPL-1.0-or-later

//! `config.yaml` access.
//!
//! The application's config file is shared with the Python side, so it is
//! handled as an untyped YAML tree: keys are addressed by dotted path and
//! unrelated keys survive an update untouched. The installer's own settings
//! live under the optional `installer` key.

use crate::types::MediaPolicy;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

mod yaml_edit;

pub const CONFIG_FILE: &str = "config.yaml";
pub const DISPLAY_LANGUAGE_KEY: &str = "display_language";
const INSTALLER_KEY: &str = "installer";

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `config.yaml` inside a project directory.
    pub fn in_project(project_dir: &Path) -> Self {
        Self::new(project_dir.join(CONFIG_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_content(&self) -> Result<String> {
        if !self.path.exists() {
            return Ok(String::new());
        }
        fs::read_to_string(&self.path).with_context(|| format!("reading {}", self.path.display()))
    }

    fn parse_tree(&self, content: &str) -> Result<Value> {
        if yaml_edit::is_blank(content) {
            return Ok(Value::Mapping(Mapping::new()));
        }
        let tree: Value = serde_yaml::from_str(content)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(if tree.is_null() {
            Value::Mapping(Mapping::new())
        } else {
            tree
        })
    }

    fn read_tree(&self) -> Result<Value> {
        let content = self.read_content()?;
        self.parse_tree(&content)
    }

    /// Value at a dotted key. Missing keys and explicit nulls are `None`.
    pub fn load_key(&self, key: &str) -> Result<Option<Value>> {
        let tree = self.read_tree()?;
        let mut node = &tree;
        for part in key.split('.') {
            match node.get(part) {
                Some(child) => node = child,
                None => return Ok(None),
            }
        }
        if node.is_null() {
            return Ok(None);
        }
        Ok(Some(node.clone()))
    }

    /// Scalar value at a dotted key as text. Numbers and booleans are kept
    /// as written; empty strings, nulls and collections count as unset.
    pub fn load_string(&self, key: &str) -> Result<Option<String>> {
        let text = match self.load_key(key)? {
            Some(Value::String(text)) => text,
            Some(Value::Number(number)) => number.to_string(),
            Some(Value::Bool(flag)) => flag.to_string(),
            _ => return Ok(None),
        };
        Ok(Some(text).filter(|text| !text.trim().is_empty()))
    }

    /// Set a dotted key.
    ///
    /// The file is shared with the application, which keeps comments and
    /// quoting when it writes. An existing scalar is therefore rewritten on
    /// its own line and a missing top-level key is appended; only creating
    /// nested mappings re-serializes the whole document.
    pub fn update_key(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let content = self.read_content()?;
        let mut tree = self.parse_tree(&content)?;
        set_in_tree(&mut tree, key, value.clone())?;

        let edited = yaml_edit::edit_scalar(&content, key, &value)
            .filter(|edited| serde_yaml::from_str::<Value>(edited).ok().as_ref() == Some(&tree));
        let output = match edited {
            Some(edited) => edited,
            None => {
                debug!(key, "rewriting whole config");
                serde_yaml::to_string(&tree).context("serializing config")?
            }
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        fs::write(&self.path, output).with_context(|| format!("writing {}", self.path.display()))?;
        debug!(key, path = %self.path.display(), "config updated");
        Ok(())
    }

    pub fn installer_settings(&self) -> Result<InstallerSettings> {
        match self.load_key(INSTALLER_KEY)? {
            Some(value) => serde_yaml::from_value(value).with_context(|| {
                format!("parsing `{}` section of {}", INSTALLER_KEY, self.path.display())
            }),
            None => Ok(InstallerSettings::default()),
        }
    }
}

/// Insert `value` at a dotted key, creating intermediate mappings.
fn set_in_tree(tree: &mut Value, key: &str, value: Value) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let (last, parents) = parts
        .split_last()
        .ok_or_else(|| anyhow!("empty config key"))?;

    let mut node = tree;
    for part in parents {
        let map = node
            .as_mapping_mut()
            .ok_or_else(|| anyhow!("config key {} crosses a non-mapping value", key))?;
        node = map
            .entry(Value::String((*part).to_string()))
            .or_insert_with(|| Value::Mapping(Mapping::new()));
    }
    let map = node
        .as_mapping_mut()
        .ok_or_else(|| anyhow!("config key {} crosses a non-mapping value", key))?;
    map.insert(Value::String((*last).to_string()), value);
    Ok(())
}

/// Optional `installer:` section of `config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InstallerSettings {
    pub python: Option<PathBuf>,
    pub pip_mirror: Option<String>,
    pub require_ffmpeg: bool,
    pub auto_launch: bool,
    pub app_command: Vec<String>,
}

impl Default for InstallerSettings {
    fn default() -> Self {
        Self {
            python: None,
            pip_mirror: None,
            require_ffmpeg: false,
            auto_launch: true,
            app_command: vec!["streamlit".into(), "run".into(), "st.py".into()],
        }
    }
}

impl InstallerSettings {
    pub fn media_policy(&self) -> MediaPolicy {
        if self.require_ffmpeg {
            MediaPolicy::Strict
        } else {
            MediaPolicy::Advisory
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_nothing() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::in_project(dir.path());
        assert!(store.load_key(DISPLAY_LANGUAGE_KEY).unwrap().is_none());
        assert_eq!(store.installer_settings().unwrap(), InstallerSettings::default());
    }

    #[test]
    fn update_preserves_unrelated_keys() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::in_project(dir.path());
        fs::write(
            store.path(),
            "api:\n  key: secret\n  model: gpt\ndisplay_language: en\n",
        )
        .unwrap();

        store.update_key(DISPLAY_LANGUAGE_KEY, "zh-CN").unwrap();
        store.update_key("api.model", "claude").unwrap();

        assert_eq!(store.load_string(DISPLAY_LANGUAGE_KEY).unwrap().as_deref(), Some("zh-CN"));
        assert_eq!(store.load_string("api.key").unwrap().as_deref(), Some("secret"));
        assert_eq!(store.load_string("api.model").unwrap().as_deref(), Some("claude"));
    }

    #[test]
    fn update_creates_nested_mappings() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::in_project(dir.path());
        store.update_key("installer.pip_mirror", "https://mirror.example/simple").unwrap();
        let settings = store.installer_settings().unwrap();
        assert_eq!(settings.pip_mirror.as_deref(), Some("https://mirror.example/simple"));
        assert!(settings.auto_launch);
    }

    #[test]
    fn update_through_scalar_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::in_project(dir.path());
        store.update_key("whisper", "large-v3").unwrap();
        assert!(store.update_key("whisper.model", "x").is_err());
    }

    #[test]
    fn empty_string_counts_as_unset() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::in_project(dir.path());
        fs::write(store.path(), "display_language: ''\n").unwrap();
        assert!(store.load_string(DISPLAY_LANGUAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn language_update_keeps_comments_and_quotes() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::in_project(dir.path());
        fs::write(
            store.path(),
            "# VideoLingo settings\n## API key\napi:\n  key: 'secret'  # keep private\ndisplay_language: 'en'  # ui\n",
        )
        .unwrap();

        store.update_key(DISPLAY_LANGUAGE_KEY, "ja").unwrap();

        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "# VideoLingo settings\n## API key\napi:\n  key: 'secret'  # keep private\ndisplay_language: 'ja'  # ui\n"
        );
    }

    #[test]
    fn nested_scalar_is_edited_on_its_own_line() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::in_project(dir.path());
        fs::write(store.path(), "api:\n  # which model\n  model: gpt  # default\n").unwrap();

        store.update_key("api.model", "claude").unwrap();

        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "api:\n  # which model\n  model: claude  # default\n"
        );
    }

    #[test]
    fn missing_key_is_appended_after_comments() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::in_project(dir.path());
        fs::write(store.path(), "# settings\nwhisper: large-v3\n").unwrap();

        store.update_key(DISPLAY_LANGUAGE_KEY, "zh-CN").unwrap();

        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "# settings\nwhisper: large-v3\ndisplay_language: zh-CN\n"
        );
    }

    #[test]
    fn comment_only_file_accepts_a_first_key() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::in_project(dir.path());
        fs::write(store.path(), "# nothing yet\n").unwrap();
        assert!(store.load_key(DISPLAY_LANGUAGE_KEY).unwrap().is_none());

        store.update_key(DISPLAY_LANGUAGE_KEY, "en").unwrap();

        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "# nothing yet\ndisplay_language: en\n"
        );
    }

    #[test]
    fn non_string_scalars_are_kept_as_text() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::in_project(dir.path());
        fs::write(store.path(), "display_language: 123\nflag: true\nlist: [a]\n").unwrap();
        assert_eq!(store.load_string(DISPLAY_LANGUAGE_KEY).unwrap().as_deref(), Some("123"));
        assert_eq!(store.load_string("flag").unwrap().as_deref(), Some("true"));
        assert!(store.load_string("list").unwrap().is_none());
    }

    #[test]
    fn installer_section_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::in_project(dir.path());
        fs::write(
            store.path(),
            "installer:\n  require_ffmpeg: true\n  auto_launch: false\n  app_command: [streamlit, run, app.py]\n",
        )
        .unwrap();
        let settings = store.installer_settings().unwrap();
        assert_eq!(settings.media_policy(), MediaPolicy::Strict);
        assert!(!settings.auto_launch);
        assert_eq!(settings.app_command, vec!["streamlit", "run", "app.py"]);
    }
}
