use crate::ui::width_util::WidthUtil;
use std::io::{self, Write};

const COLUMN_GAP: &str = " | ";

/// A titled table waiting to be rendered.
#[derive(Debug, Clone)]
pub struct Table<'a> {
    title: &'a str,
    headers: &'a [&'a str],
    rows: Vec<Vec<String>>,
    empty_message: Option<&'a str>,
    min_width: usize,
}

impl<'a> Table<'a> {
    pub fn new(title: &'a str, headers: &'a [&'a str]) -> Self {
        Self {
            title,
            headers,
            rows: Vec::new(),
            empty_message: None,
            min_width: 0,
        }
    }

    pub fn rows(mut self, rows: Vec<Vec<String>>) -> Self {
        self.rows = rows;
        self
    }

    pub fn empty_message(mut self, msg: &'a str) -> Self {
        self.empty_message = Some(msg);
        self
    }

    pub fn min_width(mut self, width: usize) -> Self {
        self.min_width = width;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct TablePrinter {
    util: WidthUtil,
    left_pad: usize,
}

impl TablePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy that indents every line by `pad` spaces.
    pub fn with_left_pad(&self, pad: usize) -> Self {
        Self {
            util: self.util.clone(),
            left_pad: pad,
        }
    }

    /// Widest visible cell per column, headers included.
    fn column_widths(&self, table: &Table<'_>) -> Vec<usize> {
        let mut widths: Vec<usize> = table
            .headers
            .iter()
            .map(|h| self.util.visible_width(h))
            .collect();
        for row in &table.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(self.util.visible_width(cell));
            }
        }
        widths
    }

    /// Width of the rendered table, at least as wide as its title.
    pub fn width_of(&self, table: &Table<'_>) -> usize {
        let widths = self.column_widths(table);
        let natural = widths.iter().sum::<usize>()
            + widths.len().saturating_sub(1) * COLUMN_GAP.len();
        let mut width = natural
            .max(table.min_width)
            .max(self.util.visible_width(table.title));
        if table.rows.is_empty() {
            if let Some(msg) = table.empty_message {
                width = width.max(self.util.visible_width(msg));
            }
        }
        width
    }

    pub fn render<W: Write + ?Sized>(&self, table: &Table<'_>, out: &mut W) -> io::Result<()> {
        let width = self.width_of(table);
        self.render_banner(table.title, width, out)?;

        if table.rows.is_empty() {
            if let Some(msg) = table.empty_message {
                self.line(out, msg)?;
                return self.rule(out, width);
            }
        }

        let widths = self.column_widths(table);
        if !table.headers.is_empty() {
            let header: Vec<String> = table.headers.iter().map(|h| h.to_string()).collect();
            self.line(out, &self.join(&header, &widths))?;
            self.rule(out, width)?;
        }
        for row in &table.rows {
            self.line(out, &self.join(row, &widths))?;
        }
        self.rule(out, width)
    }

    pub fn print(&self, table: &Table<'_>) {
        let _ = self.render(table, &mut io::stdout());
    }

    pub fn render_banner<W: Write + ?Sized>(
        &self,
        title: &str,
        width: usize,
        out: &mut W,
    ) -> io::Result<()> {
        let width = width.max(self.util.visible_width(title));
        self.rule(out, width)?;
        self.line(out, &title.to_uppercase())?;
        self.rule(out, width)
    }

    fn join(&self, cells: &[String], widths: &[usize]) -> String {
        let last = widths.len().saturating_sub(1);
        cells
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (cell, w))| {
                if i == last {
                    cell.clone()
                } else {
                    self.util.pad_visible(cell, *w)
                }
            })
            .collect::<Vec<_>>()
            .join(COLUMN_GAP)
    }

    fn line<W: Write + ?Sized>(&self, out: &mut W, s: &str) -> io::Result<()> {
        writeln!(out, "{}{}", " ".repeat(self.left_pad), s)
    }

    fn rule<W: Write + ?Sized>(&self, out: &mut W, width: usize) -> io::Result<()> {
        self.line(out, &"-".repeat(width.max(1)))
    }
}
