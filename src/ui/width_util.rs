use terminal_size::{Width, terminal_size};

use crate::ui::ascii::ESC_BYTE;

const FALLBACK_TERMINAL_WIDTH: usize = 80;

/// Measuring and padding text that may carry color sequences.
#[derive(Debug, Default, Clone)]
pub struct WidthUtil;

/// Drop every `ESC [ ... <letter>` sequence.
pub(crate) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_csi = false;
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if in_csi {
            if c.is_ascii_alphabetic() {
                in_csi = false;
            }
            continue;
        }
        if c as u32 == ESC_BYTE as u32 && chars.peek() == Some(&'[') {
            chars.next();
            in_csi = true;
            continue;
        }
        out.push(c);
    }
    out
}

impl WidthUtil {
    pub fn visible_width(&self, s: &str) -> usize {
        strip_ansi(s).chars().count()
    }

    pub fn pad_visible(&self, s: &str, width: usize) -> String {
        let missing = width.saturating_sub(self.visible_width(s));
        format!("{s}{}", " ".repeat(missing))
    }

    /// Cut plain text to `width` characters, marking the cut with `~`.
    pub fn truncate(&self, s: &str, width: usize) -> String {
        if s.chars().count() <= width {
            return s.to_string();
        }
        if width == 0 {
            return String::new();
        }
        let mut out: String = s.chars().take(width - 1).collect();
        out.push('~');
        out
    }

    /// Best-effort terminal width.
    pub fn terminal_width(&self) -> usize {
        match terminal_size() {
            Some((Width(w), _)) => w as usize,
            None => FALLBACK_TERMINAL_WIDTH,
        }
    }

    /// Left padding that centers `content_width` columns in the terminal.
    pub fn center_pad(&self, content_width: usize) -> usize {
        self.terminal_width().saturating_sub(content_width) / 2
    }
}
