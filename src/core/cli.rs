use crate::core::types::{parse_date, parse_timestamp};
use crate::errors::{Error, Result, require_parse};
use chrono::{DateTime, NaiveDate, Utc};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct CliPaths {
    pub config_path: PathBuf,
    pub logs_dir: PathBuf,
}

impl Default for CliPaths {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("config.json"),
            logs_dir: PathBuf::from("logs"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Every demo with its time state.
    Agenda {
        demos: PathBuf,
        now: Option<DateTime<Utc>>,
    },
    /// The Monday-to-Sunday week around `date`.
    Week {
        demos: PathBuf,
        date: Option<NaiveDate>,
        now: Option<DateTime<Utc>>,
    },
    Conflicts {
        demos: PathBuf,
        start: DateTime<Utc>,
        minutes: u32,
        exclude: Option<String>,
    },
    /// Pixel offset to snapped grid time.
    Slot { y: f32, date: Option<NaiveDate> },
    /// Show the config, or set one key.
    Config { set: Option<(String, String)> },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Agenda { .. } => "agenda",
            Command::Week { .. } => "week",
            Command::Conflicts { .. } => "conflicts",
            Command::Slot { .. } => "slot",
            Command::Config { .. } => "config",
        }
    }
}

pub const USAGE: &str = "\
usage: democal [--config PATH] [--logs DIR] <command>

commands:
  agenda <demos.json> [--now TIMESTAMP]
  week <demos.json> [--date YYYY-MM-DD] [--now TIMESTAMP]
  conflicts <demos.json> <start TIMESTAMP> <minutes> [--exclude ID]
  slot <relative_y> [--date YYYY-MM-DD]
  config [KEY VALUE]";

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub paths: CliPaths,
    pub command: Command,
}

#[derive(Default)]
struct Flags {
    now: Option<DateTime<Utc>>,
    date: Option<NaiveDate>,
    exclude: Option<String>,
}

impl CliArgs {
    pub fn from_env() -> Result<Self> {
        Self::from_args(std::env::args().skip(1))
    }

    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut paths = CliPaths::default();
        let mut flags = Flags::default();
        let mut positional = Vec::new();

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => paths.config_path = PathBuf::from(Self::next_value(&mut args, &arg)?),
                "--logs" => paths.logs_dir = PathBuf::from(Self::next_value(&mut args, &arg)?),
                "--now" => flags.now = Some(parse_timestamp(&Self::next_value(&mut args, &arg)?)?),
                "--date" => flags.date = Some(parse_date(&Self::next_value(&mut args, &arg)?)?),
                "--exclude" => flags.exclude = Some(Self::next_value(&mut args, &arg)?),
                flag if flag.starts_with("--") => {
                    return Err(Error::parse(format!("Unknown argument: {flag}")));
                }
                _ => positional.push(arg),
            }
        }

        let command = Self::command(positional, &flags)?;
        Self::check_flags(&command, &flags)?;
        Ok(Self { paths, command })
    }

    fn command(positional: Vec<String>, flags: &Flags) -> Result<Command> {
        let mut it = positional.into_iter();
        let name = require_parse(it.next(), format!("Missing command.\n{USAGE}"))?;
        let rest: Vec<String> = it.collect();

        let command = match (name.as_str(), rest.as_slice()) {
            ("agenda", [demos]) => Command::Agenda {
                demos: PathBuf::from(demos),
                now: flags.now,
            },
            ("week", [demos]) => Command::Week {
                demos: PathBuf::from(demos),
                date: flags.date,
                now: flags.now,
            },
            ("conflicts", [demos, start, minutes]) => Command::Conflicts {
                demos: PathBuf::from(demos),
                start: parse_timestamp(start)?,
                minutes: minutes
                    .parse()
                    .map_err(|_| Error::parse(format!("Invalid minutes: '{minutes}'.")))?,
                exclude: flags.exclude.clone(),
            },
            ("slot", [y]) => Command::Slot {
                y: y
                    .parse()
                    .map_err(|_| Error::parse(format!("Invalid pixel offset: '{y}'.")))?,
                date: flags.date,
            },
            ("config", []) => Command::Config { set: None },
            ("config", [key, value]) => Command::Config {
                set: Some((key.clone(), value.clone())),
            },
            ("agenda" | "week" | "conflicts" | "slot" | "config", _) => {
                return Err(Error::parse(format!(
                    "Wrong arguments for '{name}'.\n{USAGE}"
                )));
            }
            _ => return Err(Error::parse(format!("Unknown command: {name}\n{USAGE}"))),
        };
        Ok(command)
    }

    /// Reject flags the chosen command does not take.
    fn check_flags(command: &Command, flags: &Flags) -> Result<()> {
        let (takes_now, takes_date, takes_exclude) = match command {
            Command::Agenda { .. } => (true, false, false),
            Command::Week { .. } => (true, true, false),
            Command::Conflicts { .. } => (false, false, true),
            Command::Slot { .. } => (false, true, false),
            Command::Config { .. } => (false, false, false),
        };
        let stray = [
            ("--now", flags.now.is_some() && !takes_now),
            ("--date", flags.date.is_some() && !takes_date),
            ("--exclude", flags.exclude.is_some() && !takes_exclude),
        ]
        .into_iter()
        .find(|(_, bad)| *bad);
        match stray {
            Some((flag, _)) => Err(Error::parse(format!(
                "'{}' does not take {flag}.",
                command.name()
            ))),
            None => Ok(()),
        }
    }

    fn next_value<I>(args: &mut I, flag: &str) -> Result<String>
    where
        I: Iterator<Item = String>,
    {
        require_parse(args.next(), format!("Missing value for {flag}"))
    }
}
