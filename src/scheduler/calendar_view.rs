use crate::core::models::Demo;
use crate::core::repository::DemoBook;
use chrono::{Datelike, Duration, NaiveDate};

/// A run of consecutive days shown side by side on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarView {
    start: NaiveDate,
    days: u32,
}

/// One column of the calendar.
#[derive(Debug)]
pub struct DayColumn<'a> {
    pub date: NaiveDate,
    pub demos: Vec<&'a Demo>,
}

impl CalendarView {
    /// Default: 7 days starting `start`.
    pub fn new(start: NaiveDate) -> Self {
        Self { start, days: 7 }
    }

    /// The Monday-to-Sunday week containing `date`. At the first
    /// representable date the week starts on `date` itself.
    pub fn week_of(date: NaiveDate) -> Self {
        let offset = date.weekday().num_days_from_monday() as i64;
        Self::new(date.checked_sub_signed(Duration::days(offset)).unwrap_or(date))
    }

    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Day after the last visible one; `None` past the last date chrono
    /// can hold.
    pub fn end_exclusive(&self) -> Option<NaiveDate> {
        self.start
            .checked_add_signed(Duration::days(self.days as i64))
    }

    /// Visible days, cut short at the end of the calendar.
    pub fn days(&self) -> Vec<NaiveDate> {
        (0..self.days)
            .map_while(|offset| self.start.checked_add_signed(Duration::days(offset as i64)))
            .collect()
    }

    /// Week shifted by `weeks` (negative goes back).
    pub fn shifted_weeks(&self, weeks: i64) -> Option<Self> {
        let start = self.start.checked_add_signed(Duration::try_weeks(weeks)?)?;
        Some(Self {
            start,
            days: self.days,
        })
    }

    /// Every visible day with its demos in start order. Demos outside the
    /// range are left out; days without demos still get a column.
    pub fn columns<'a>(&self, book: &'a DemoBook) -> Vec<DayColumn<'a>> {
        let mut columns: Vec<DayColumn<'a>> = self
            .days()
            .into_iter()
            .map(|date| DayColumn {
                date,
                demos: Vec::new(),
            })
            .collect();

        for demo in book.chronological() {
            let date = demo.scheduled_at.date_naive();
            if date < self.start || self.end_exclusive().is_some_and(|end| date >= end) {
                continue;
            }
            let idx = (date - self.start).num_days() as usize;
            if let Some(col) = columns.get_mut(idx) {
                col.demos.push(demo);
            }
        }
        columns
    }
}
