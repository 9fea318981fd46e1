// SPDX-License-Identifier: PMPL-1.0-or-later

//! Internationalisation module for lingo-bootstrap.
//!
//! The installer speaks the same display language the application is
//! configured for (`display_language` in `config.yaml`), so a user who picked
//! Chinese in the web UI gets a Chinese installer on the next run.
//!
//! ## Supported languages
//!
//! | Code  | Language            | Native name |
//! |-------|---------------------|-------------|
//! | en    | English             | English     |
//! | zh-CN | Simplified Chinese  | 简体中文     |
//! | es    | Spanish             | Español     |
//! | fr    | French              | Français    |
//! | ja    | Japanese            | 日本語       |
//!
//! Lookups fall back to English when a key is missing in the requested
//! language. The catalog is static data embedded at compile time.

mod catalog;

pub use catalog::{fill, t, t_or_key, Lang};

/// Language used when `config.yaml` has none yet.
pub const DEFAULT_LANGUAGE: Lang = Lang::ZhCn;

/// Translate and fill `{}` placeholders in one go.
pub fn tf(lang: Lang, key: &str, args: &[&str]) -> String {
    fill(t_or_key(lang, key), args)
}
