use crate::errors::{Error, Result};
use std::str::FromStr;
use strum::IntoEnumIterator;

/// Every variant's string form, comma separated, for error messages.
pub fn valid_csv<T>() -> String
where
    T: IntoEnumIterator + AsRef<str>,
{
    T::iter()
        .map(|v| v.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a trimmed `input` into `T`. The error names `what` and lists the
/// accepted spellings.
pub fn parse_variant<T>(what: &str, input: &str) -> Result<T>
where
    T: FromStr + IntoEnumIterator + AsRef<str>,
{
    let input = input.trim();
    T::from_str(input).map_err(|_| {
        Error::Parse(format!(
            "Invalid {what}: '{input}'. Valid values: {}",
            valid_csv::<T>()
        ))
    })
}
