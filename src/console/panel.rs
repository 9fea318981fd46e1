// SPDX-License-Identifier: PMPL-1.0-or-later

//! Boxed console panels.
//!
//! Layout is computed on the plain text (terminal cell widths via
//! `unicode-width`, so CJK and emoji line up) and colour is applied last,
//! which keeps ANSI escapes out of the width arithmetic.

use colored::*;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Cyan,
    Green,
    Yellow,
    Red,
    BoldGreen,
    BoldMagenta,
    BrightBlue,
}

impl Tone {
    pub fn paint(&self, text: &str) -> ColoredString {
        match self {
            Tone::Plain => text.normal(),
            Tone::Cyan => text.cyan(),
            Tone::Green => text.green(),
            Tone::Yellow => text.yellow(),
            Tone::Red => text.red(),
            Tone::BoldGreen => text.green().bold(),
            Tone::BoldMagenta => text.magenta().bold(),
            Tone::BrightBlue => text.bright_blue(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    Single,
    Double,
}

struct BoxChars {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

impl Border {
    fn chars(&self) -> BoxChars {
        match self {
            Border::Single => BoxChars {
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                horizontal: '─',
                vertical: '│',
            },
            Border::Double => BoxChars {
                top_left: '╔',
                top_right: '╗',
                bottom_left: '╚',
                bottom_right: '╝',
                horizontal: '═',
                vertical: '║',
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Line {
    text: String,
    strong: bool,
}

#[derive(Debug, Clone)]
pub struct Panel {
    lines: Vec<Line>,
    title: Option<String>,
    tone: Tone,
    border_tone: Option<Tone>,
    border: Border,
    width: Option<usize>,
    fit: bool,
}

impl Panel {
    /// Panel spanning the console width. `body` may contain newlines.
    pub fn new(body: &str) -> Self {
        let mut panel = Self {
            lines: Vec::new(),
            title: None,
            tone: Tone::Plain,
            border_tone: None,
            border: Border::Single,
            width: None,
            fit: false,
        };
        panel.push(body, false);
        panel
    }

    /// Panel shrunk to its widest line.
    pub fn fit(body: &str) -> Self {
        Self {
            fit: true,
            ..Self::new(body)
        }
    }

    fn push(&mut self, text: &str, strong: bool) {
        for line in text.split('\n') {
            self.lines.push(Line {
                text: line.to_string(),
                strong,
            });
        }
    }

    /// Append plain lines.
    pub fn line(mut self, text: &str) -> Self {
        self.push(text, false);
        self
    }

    /// Append emphasised lines (commands, paths).
    pub fn strong(mut self, text: &str) -> Self {
        self.push(text, true);
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn border_tone(mut self, tone: Tone) -> Self {
        self.border_tone = Some(tone);
        self
    }

    pub fn double(mut self) -> Self {
        self.border = Border::Double;
        self
    }

    /// Fixed outer width, borders included.
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Plain text of the body, one entry per wrapped line.
    pub fn body_lines(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }

    fn inner_width(&self, console_width: usize) -> usize {
        let widest = self
            .lines
            .iter()
            .map(|line| line.text.width())
            .chain(self.title.iter().map(|title| title.width() + 2))
            .max()
            .unwrap_or(0);
        let outer = match self.width {
            Some(width) => width,
            None if self.fit => (widest + 4).min(console_width),
            None => console_width,
        };
        outer.saturating_sub(4).max(1)
    }

    /// Render to text, coloured when the terminal supports it.
    pub fn render(&self, console_width: usize) -> String {
        let inner = self.inner_width(console_width);
        let chars = self.border.chars();
        let border_tone = self.border_tone.unwrap_or(self.tone);
        let mut out = Vec::new();

        out.push(border_tone.paint(&top_rule(&chars, inner, self.title.as_deref())).to_string());

        for line in &self.lines {
            for segment in wrap(&line.text, inner) {
                let padding = " ".repeat(inner.saturating_sub(segment.width()));
                let mut text = self.tone.paint(&segment);
                if line.strong {
                    text = text.bold();
                }
                out.push(format!(
                    "{} {}{} {}",
                    border_tone.paint(&chars.vertical.to_string()),
                    text,
                    padding,
                    border_tone.paint(&chars.vertical.to_string()),
                ));
            }
        }

        let bottom = format!(
            "{}{}{}",
            chars.bottom_left,
            chars.horizontal.to_string().repeat(inner + 2),
            chars.bottom_right
        );
        out.push(border_tone.paint(&bottom).to_string());
        out.join("\n")
    }
}

fn top_rule(chars: &BoxChars, inner: usize, title: Option<&str>) -> String {
    let span = inner + 2;
    let horizontal = chars.horizontal.to_string();
    match title {
        Some(title) if title.width() + 2 <= span => {
            let label = format!(" {} ", title);
            let rest = span - label.width();
            let left = rest / 2;
            format!(
                "{}{}{}{}{}",
                chars.top_left,
                horizontal.repeat(left),
                label,
                horizontal.repeat(rest - left),
                chars.top_right
            )
        }
        _ => format!("{}{}{}", chars.top_left, horizontal.repeat(span), chars.top_right),
    }
}

/// Break `text` into segments no wider than `width` terminal cells,
/// preferring spaces as break points. Words wider than a whole line are
/// split between characters.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    if text.width() <= width {
        return vec![text.to_string()];
    }

    let mut segments = Vec::new();
    let mut current = String::new();
    for word in text.split(' ').filter(|word| !word.is_empty()) {
        let gap = usize::from(!current.is_empty());
        if current.width() + gap + word.width() <= width {
            if gap == 1 {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }
        if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if current.width() + ch_width > width && !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
            current.push(ch);
        }
    }
    if !current.is_empty() || segments.is_empty() {
        segments.push(current);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(panel: &Panel, width: usize) -> Vec<String> {
        colored::control::set_override(false);
        panel.render(width).lines().map(str::to_string).collect()
    }

    #[test]
    fn fit_panel_hugs_its_content() {
        let lines = plain(&Panel::fit("abc"), 80);
        assert_eq!(lines, vec!["╭─────╮", "│ abc │", "╰─────╯"]);
    }

    #[test]
    fn full_panel_spans_console_width() {
        let lines = plain(&Panel::new("hi"), 20);
        assert!(lines.iter().all(|line| line.width() == 20), "{:?}", lines);
    }

    #[test]
    fn wide_characters_are_aligned() {
        let lines = plain(&Panel::fit("安装完成\nok"), 80);
        let widths: Vec<usize> = lines.iter().map(|line| line.width()).collect();
        assert!(widths.windows(2).all(|pair| pair[0] == pair[1]), "{:?}", lines);
    }

    #[test]
    fn title_is_centered_in_double_border() {
        let lines = plain(&Panel::new("x").double().title("T").width(11), 80);
        assert_eq!(lines[0], "╔═══ T ═══╗");
        assert_eq!(lines[2], "╚═════════╝");
    }

    #[test]
    fn long_lines_wrap_on_spaces() {
        assert_eq!(wrap("alpha beta gamma", 10), vec!["alpha beta", "gamma"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wide_character_after_leading_space_moves_to_next_line() {
        let segments = wrap(" abcdefghi漢", 10);
        assert_eq!(segments, vec!["abcdefghi", "漢"]);
        assert!(segments.iter().all(|segment| segment.width() <= 10));
    }

    #[test]
    fn wrapped_wide_text_keeps_the_box_closed() {
        let lines = plain(&Panel::new(" abcdefghi漢"), 14);
        assert_eq!(lines.len(), 4, "{:?}", lines);
        assert!(lines.iter().all(|line| line.width() == 14), "{:?}", lines);
    }

    #[test]
    fn glyph_wider_than_the_box_does_not_underflow() {
        let lines = plain(&Panel::new("漢字").width(5), 80);
        assert!(lines.iter().all(|line| line.width() >= 5), "{:?}", lines);
    }
}
