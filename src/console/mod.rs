// SPDX-License-Identifier: PMPL-1.0-or-later

//! Console output for the installer

pub mod panel;

pub use panel::{Panel, Tone};

use crate::i18n::{t, tf, Lang};
use std::env;

const DEFAULT_WIDTH: usize = 80;

/// Writes translated panels and notes to stdout.
#[derive(Debug, Clone)]
pub struct Console {
    lang: Lang,
    width: usize,
}

impl Console {
    pub fn new(lang: Lang) -> Self {
        Self {
            lang,
            width: terminal_width(),
        }
    }

    pub fn with_width(lang: Lang, width: usize) -> Self {
        Self { lang, width }
    }

    pub fn set_lang(&mut self, lang: Lang) {
        self.lang = lang;
    }

    pub fn t(&self, key: &str) -> &'static str {
        t(self.lang, key)
    }

    pub fn tf(&self, key: &str, args: &[&str]) -> String {
        tf(self.lang, key, args)
    }

    pub fn panel(&self, panel: &Panel) {
        println!("{}", panel.render(self.width));
    }

    /// Single styled line, no box.
    pub fn note(&self, text: &str, tone: Tone) {
        println!("{}", tone.paint(text));
    }
}

/// Console width from `COLUMNS`, else 80.
fn terminal_width() -> usize {
    env::var("COLUMNS")
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|width| *width >= 20)
        .unwrap_or(DEFAULT_WIDTH)
}
