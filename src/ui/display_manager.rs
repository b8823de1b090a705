use crate::config::Config;
use crate::extensions::chrono::UtcExt;
use crate::core::models::{Demo, ScheduledInterval};
use crate::scheduler::calendar_view::DayColumn;
use crate::scheduler::conflict::ConflictSet;
use crate::scheduler::drag::SlotTime;
use crate::scheduler::time_window::{DisplayState, classify};
use crate::scheduler::{AgendaEntry, Suggestion};
use crate::ui::palette;
use crate::ui::table_printer::{Table, TablePrinter};
use crate::ui::width_util::WidthUtil;
use chrono::{DateTime, NaiveDate, Utc};
use std::io::{self, Write};

const LEAD_COLUMN_WIDTH: usize = 28;

#[derive(Debug, Default, Clone)]
pub struct DisplayManager {
    pub printer: TablePrinter,
    pub util: WidthUtil,
}

fn when(interval: &ScheduledInterval) -> String {
    interval.to_string()
}

fn demo_when(demo: &Demo) -> String {
    match demo.interval() {
        Ok(interval) => when(&interval),
        Err(_) => demo.scheduled_at.format("%Y-%m-%d %H:%M").to_string(),
    }
}

fn yes_no(b: bool) -> String {
    if b { "yes" } else { "no" }.to_string()
}

impl DisplayManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn lead(&self, demo: &Demo) -> String {
        self.util.truncate(demo.display_name(), LEAD_COLUMN_WIDTH)
    }

    pub fn render_agenda<W: Write + ?Sized>(
        &self,
        entries: &[AgendaEntry<'_>],
        now: DateTime<Utc>,
        out: &mut W,
    ) -> io::Result<()> {
        let headers = ["ID", "WHEN", "LEAD", "TYPE", "STATE", "CAN START"];
        let rows = entries
            .iter()
            .map(|e| {
                vec![
                    e.demo.id.clone(),
                    demo_when(e.demo),
                    self.lead(e.demo),
                    e.demo.demo_type.to_string(),
                    palette::paint(e.display_state),
                    yes_no(e.can_start),
                ]
            })
            .collect();
        let title = format!("Agenda at {}", now.format("%Y-%m-%d %H:%M"));
        let table = Table::new(&title, &headers)
            .rows(rows)
            .empty_message("No demos scheduled.");
        self.printer.render(&table, out)
    }

    pub fn render_conflicts<W: Write + ?Sized>(
        &self,
        candidate: &ScheduledInterval,
        conflicts: &ConflictSet,
        suggestion: &Suggestion,
        out: &mut W,
    ) -> io::Result<()> {
        let headers = ["ID", "LEAD", "WHEN", "OVERLAP"];
        let rows = conflicts
            .iter()
            .map(|c| {
                vec![
                    c.id.clone(),
                    self.util.truncate(&c.label, LEAD_COLUMN_WIDTH),
                    when(&c.interval),
                    format!("{} min", c.overlap_minutes),
                ]
            })
            .collect();
        let title = format!("Conflicts for {candidate}");
        let table = Table::new(&title, &headers)
            .rows(rows)
            .empty_message("No conflicts.");
        self.printer.render(&table, out)?;

        if !conflicts.is_empty() {
            match suggestion.next {
                Some(next) => writeln!(out, "Next slot: {}", next.format("%Y-%m-%d %H:%M"))?,
                None => writeln!(out, "Next slot: none")?,
            }
            match suggestion.free {
                Some(free) => writeln!(out, "First free slot: {}", free.format("%Y-%m-%d %H:%M"))?,
                None => writeln!(out, "First free slot: none found")?,
            }
        }
        Ok(())
    }

    pub fn render_slot<W: Write + ?Sized>(
        &self,
        relative_y: f32,
        slot: SlotTime,
        on_date: Option<DateTime<Utc>>,
        out: &mut W,
    ) -> io::Result<()> {
        match on_date {
            Some(ts) => writeln!(out, "y={relative_y} -> {slot} ({})", ts.to_rfc3339()),
            None => writeln!(out, "y={relative_y} -> {slot}"),
        }
    }

    pub fn render_week<W: Write + ?Sized>(
        &self,
        columns: &[DayColumn<'_>],
        now: DateTime<Utc>,
        out: &mut W,
    ) -> io::Result<()> {
        let headers = ["ID", "TIME", "LEAD", "STATE"];
        let titles: Vec<String> = columns
            .iter()
            .map(|c| c.date.format("%a %Y-%m-%d").to_string())
            .collect();
        let tables: Vec<Table<'_>> = columns
            .iter()
            .zip(&titles)
            .map(|(col, title)| {
                let rows = col
                    .demos
                    .iter()
                    .map(|d| {
                        vec![
                            d.id.clone(),
                            d.interval()
                                .map(|i| format!("{}-{}", i.start().hm(), i.end().hm()))
                                .unwrap_or_else(|_| d.scheduled_at.hm()),
                            self.lead(d),
                            palette::paint(state_of(d, now)),
                        ]
                    })
                    .collect();
                Table::new(title, &headers).rows(rows).empty_message("-")
            })
            .collect();

        let width = tables
            .iter()
            .map(|t| self.printer.width_of(t))
            .max()
            .unwrap_or(0);
        if let Some(first) = columns.first() {
            self.printer.render_banner(&week_title(first.date), width, out)?;
        }
        for table in tables {
            self.printer.render(&table.min_width(width), out)?;
        }
        Ok(())
    }

    pub fn render_config<W: Write + ?Sized>(&self, config: &Config, out: &mut W) -> io::Result<()> {
        let headers = ["KEY", "DESCRIPTION", "VALUE"];
        let rows = config
            .rows()
            .into_iter()
            .map(|(k, d, v)| vec![k, d, v])
            .collect();
        let table = Table::new("Config", &headers)
            .rows(rows)
            .empty_message("No config items found.");
        self.printer.render(&table, out)
    }

    /// Render into a buffer, center the block in the terminal, then write
    /// it to stdout in one go.
    pub fn print<F>(&self, render: F)
    where
        F: FnOnce(&DisplayManager, &mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        if render(self, &mut buf).is_err() {
            return;
        }
        let _ = io::stdout().write_all(self.centered(&String::from_utf8_lossy(&buf)).as_bytes());
    }

    fn centered(&self, block: &str) -> String {
        let widest = block
            .lines()
            .map(|l| self.util.visible_width(l))
            .max()
            .unwrap_or(0);
        let pad = " ".repeat(self.util.center_pad(widest));
        block.lines().map(|l| format!("{pad}{l}\n")).collect()
    }
}

fn state_of(demo: &Demo, now: DateTime<Utc>) -> DisplayState {
    match demo.interval() {
        Ok(i) => classify(&i, demo.status, now).display_state(demo.status),
        Err(_) => DisplayState::Status(demo.status),
    }
}

fn week_title(date: NaiveDate) -> String {
    format!("Week of {}", date.format("%Y-%m-%d"))
}
