use crate::core::types::{Bool, TimeRange};
use crate::errors::Error;
use serde::{Deserialize, Serialize};

pub trait ConfigItem<T> {
    fn get_value(&self) -> &T;
    fn set_value(&mut self, new_value: &str) -> Result<(), Error>;
    fn description(&self) -> &str;
}

fn parse_number<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, Error> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| Error::Parse(format!("Invalid {what}: '{}'.", raw.trim())))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayHoursConfigItem {
    pub value: TimeRange,
    pub description: String,
}

impl Default for DisplayHoursConfigItem {
    fn default() -> Self {
        Self {
            value: TimeRange::default(),
            description: "Hours shown on the calendar time grid.".into(),
        }
    }
}

impl ConfigItem<TimeRange> for DisplayHoursConfigItem {
    fn get_value(&self) -> &TimeRange {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = TimeRange::try_from_str(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PixelsPerHourConfigItem {
    pub value: f32,
    pub description: String,
}

impl Default for PixelsPerHourConfigItem {
    fn default() -> Self {
        Self {
            value: 60.0,
            description: "Height of one hour row on the time grid, in pixels.".into(),
        }
    }
}

impl ConfigItem<f32> for PixelsPerHourConfigItem {
    fn get_value(&self) -> &f32 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        let px: f32 = parse_number(new_value, "pixels per hour")?;
        if !(px.is_finite() && px > 0.0) {
            return Err(Error::Parse(format!(
                "Pixels per hour must be positive, got '{}'.",
                new_value.trim()
            )));
        }
        self.value = px;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapMinutesConfigItem {
    pub value: u32,
    pub description: String,
}

impl Default for SnapMinutesConfigItem {
    fn default() -> Self {
        Self {
            value: 15,
            description: "Drag-to-reschedule snapping step, in minutes.".into(),
        }
    }
}

impl ConfigItem<u32> for SnapMinutesConfigItem {
    fn get_value(&self) -> &u32 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        let snap: u32 = parse_number(new_value, "snap minutes")?;
        if snap == 0 || 60 % snap != 0 {
            return Err(Error::Parse(format!(
                "Snap minutes must divide 60 evenly, got '{}'.",
                snap
            )));
        }
        self.value = snap;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

/// Any strictly positive minute count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinutesConfigItem {
    pub value: u32,
    pub description: String,
}

impl MinutesConfigItem {
    pub fn suggest_increment_default() -> Self {
        Self {
            value: 30,
            description: "Step used when suggesting another start time.".into(),
        }
    }

    pub fn default_duration_default() -> Self {
        Self {
            value: 30,
            description: "Duration given to newly drafted demos.".into(),
        }
    }
}

impl ConfigItem<u32> for MinutesConfigItem {
    fn get_value(&self) -> &u32 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        let minutes: u32 = parse_number(new_value, "minutes")?;
        if minutes == 0 {
            return Err(Error::Parse("Minutes must be greater than zero.".into()));
        }
        self.value = minutes;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebounceConfigItem {
    pub value: u64,
    pub description: String,
}

impl Default for DebounceConfigItem {
    fn default() -> Self {
        Self {
            value: 500,
            description: "Quiet period before a conflict check is sent, in milliseconds.".into(),
        }
    }
}

impl ConfigItem<u64> for DebounceConfigItem {
    fn get_value(&self) -> &u64 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = parse_number(new_value, "debounce milliseconds")?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLoggingConfigItem {
    pub value: Bool,
    pub description: String,
}

impl Default for FileLoggingConfigItem {
    fn default() -> Self {
        Self {
            value: Bool(true),
            description: "Enable writing log messages to file.".into(),
        }
    }
}

impl ConfigItem<Bool> for FileLoggingConfigItem {
    fn get_value(&self) -> &Bool {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = Bool::try_from_str(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}
