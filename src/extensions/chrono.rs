use chrono::{DateTime, Duration, Utc};

pub trait UtcExt {
    /// Whole minutes from `self` until `later`; negative when `later` is
    /// in the past.
    fn minutes_until(&self, later: DateTime<Utc>) -> i64;

    /// `HH:MM` on the 24h clock.
    fn hm(&self) -> String;

    /// `None` when the result falls outside chrono's range.
    fn plus_minutes(&self, minutes: i64) -> Option<DateTime<Utc>>;
}

impl UtcExt for DateTime<Utc> {
    fn minutes_until(&self, later: DateTime<Utc>) -> i64 {
        (later - *self).num_minutes()
    }

    fn hm(&self) -> String {
        self.format("%H:%M").to_string()
    }

    fn plus_minutes(&self, minutes: i64) -> Option<DateTime<Utc>> {
        self.checked_add_signed(Duration::try_minutes(minutes)?)
    }
}
