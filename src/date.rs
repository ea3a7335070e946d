use std::fmt;

use anyhow::Context;
use chrono::{Local, NaiveDate};

/// Format used for the date-stamped directory names.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date used as the name of the date directory under each lab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateStamp(NaiveDate);

impl DateStamp {
    /// Today's date in the local timezone.
    #[must_use]
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Parse a `YYYY-MM-DD` string.
    ///
    /// # Errors
    /// Returns an error if the string is not a valid calendar date in that format.
    pub fn parse(value: &str) -> anyhow::Result<Self> {
        NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
            .map(Self)
            .with_context(|| format!("Invalid date '{value}', expected YYYY-MM-DD"))
    }

    #[must_use]
    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Directory name for this date.
    #[must_use]
    pub fn dir_name(&self) -> String {
        self.0.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for DateStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}
