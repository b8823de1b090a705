use crate::config::Config;
use crate::errors::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::fmt;

/// Wall-clock slot on the time grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SlotTime {
    pub hour: u32,
    pub minute: u32,
}

impl SlotTime {
    pub fn to_naive_time(self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0)
    }

    /// The UTC timestamp of this slot on `date`.
    pub fn on_date(self, date: NaiveDate) -> Result<DateTime<Utc>> {
        let time = self
            .to_naive_time()
            .ok_or_else(|| Error::parse(format!("Invalid slot time {self}.")))?;
        Ok(date.and_time(time).and_utc())
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Vertical layout of the day/week time grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pixels_per_hour: f32,
    day_start_hour: u32,
    max_hour: u32,
    snap_minutes: u32,
}

impl GridGeometry {
    pub fn new(
        pixels_per_hour: f32,
        day_start_hour: u32,
        max_hour: u32,
        snap_minutes: u32,
    ) -> Result<Self> {
        if !(pixels_per_hour.is_finite() && pixels_per_hour > 0.0) {
            return Err(Error::config(format!(
                "Pixels per hour must be positive, got {pixels_per_hour}."
            )));
        }
        if snap_minutes == 0 || 60 % snap_minutes != 0 {
            return Err(Error::config(format!(
                "Snap minutes must divide 60 evenly, got {snap_minutes}."
            )));
        }
        if day_start_hour > max_hour || max_hour > 23 {
            return Err(Error::config(format!(
                "Invalid grid hours {day_start_hour}..{max_hour}."
            )));
        }
        Ok(Self {
            pixels_per_hour,
            day_start_hour,
            max_hour,
            snap_minutes,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let hours = config.display_hours();
        Self::new(
            config.pixels_per_hour(),
            hours.start_hour(),
            hours.end_hour(),
            config.snap_minutes(),
        )
    }

    pub fn snap_minutes(&self) -> u32 {
        self.snap_minutes
    }

    pub fn hour_bounds(&self) -> (u32, u32) {
        (self.day_start_hour, self.max_hour)
    }

    /// Map a y offset inside the grid column to the snapped slot under it.
    ///
    /// Negative offsets count as the top of the grid. The hour is clamped to
    /// the grid's bounds; a minute that rounds up to 60 rolls into the next
    /// hour (itself clamped).
    pub fn pixel_to_time(&self, relative_y: f32) -> SlotTime {
        let hour_offset = relative_y.max(0.0) / self.pixels_per_hour;
        let whole = hour_offset.floor();
        let hour = (whole as u32)
            .saturating_add(self.day_start_hour)
            .clamp(self.day_start_hour, self.max_hour);

        let snap = self.snap_minutes as f32;
        let minute = (((hour_offset - whole) * 60.0 / snap).round() * snap) as u32;

        if minute >= 60 {
            SlotTime {
                hour: (hour + 1).min(self.max_hour),
                minute: 0,
            }
        } else {
            SlotTime { hour, minute }
        }
    }

    /// Top edge of `slot`, relative to the grid.
    pub fn time_to_pixel(&self, slot: SlotTime) -> f32 {
        let hours = slot.hour.saturating_sub(self.day_start_hour) as f32 + slot.minute as f32 / 60.0;
        hours * self.pixels_per_hour
    }
}
