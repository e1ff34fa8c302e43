//! Parser configuration.
//!
//! A [`ParserConfig`] is fixed once a [`crate::DateParser`] is built. Every
//! field has a default, so partial configs (e.g. from a TOML file) work.

use std::fmt;
use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::calendar::{MONTHS, WEEKDAYS};
use crate::error::ConfigError;

/// Default template skeletons: yearless and full, month-first and
/// day-of-month.
pub const DEFAULT_SKELETONS: [&str; 4] = [
    // Yearless
    "{m} {d}",
    "{d} [Of] {m}",
    // Full
    "{m} {d} {y}",
    "{d} [Of] {m} {y}",
];

/// Default range separators, in tie-break order.
pub const DEFAULT_SEPARATORS: [&str; 3] = [" to ", " - ", " through "];

/// Relative words kept by the noise filter in addition to month/weekday
/// abbreviations and separators.
const RELATIVE_WORDS: [&str; 11] = [
    "now", "today", "tomorrow", "yesterday", "this", "previous", "next", "year", "month",
    "week", "of",
];

/// Zone used to read the current instant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeZoneSpec {
    /// The system's local zone.
    #[default]
    Local,
    Utc,
    /// An IANA zone such as `Europe/Stockholm`.
    Named(Tz),
}

impl FromStr for TimeZoneSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "" => Ok(Self::Local),
            "utc" => Ok(Self::Utc),
            _ => s
                .trim()
                .parse::<Tz>()
                .map(Self::Named)
                .map_err(|_| ConfigError::UnknownTimeZone(s.to_string())),
        }
    }
}

impl TryFrom<String> for TimeZoneSpec {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeZoneSpec> for String {
    fn from(value: TimeZoneSpec) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeZoneSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Utc => f.write_str("utc"),
            Self::Named(tz) => f.write_str(tz.name()),
        }
    }
}

/// Preferred reading of numeric dates when two templates are otherwise
/// equally specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateOrder {
    /// `3/4/2020` is March 4.
    #[default]
    MonthFirst,
    /// `3/4/2020` is April 3.
    DayFirst,
}

impl FromStr for DateOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "month-first" | "mdy" | "us" => Ok(Self::MonthFirst),
            "day-first" | "dmy" | "eu" => Ok(Self::DayFirst),
            other => Err(format!("unknown date order: {other}")),
        }
    }
}

/// Configuration for [`crate::DateParser`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Zone used to read "now".
    pub tz: TimeZoneSpec,
    /// Try to split input into a two-part range.
    pub support_periods: bool,
    /// Promote single dates to a period covering that day.
    pub always_return_period: bool,
    /// Template length (minus brackets) must equal the input length.
    pub strict: bool,
    /// Tie-break between month-first and day-first numeric templates.
    pub date_order: DateOrder,
    /// Template skeletons using `{d}`, `{m}`, `{y}`, `{t}` and `[literal]`.
    pub skeletons: Vec<String>,
    /// Alphabetic tokens that survive noise filtering.
    pub unfiltered_words: Vec<String>,
    /// Substring substitutions, applied in order.
    pub replaced_words: Vec<(String, String)>,
    /// Range separators, in tie-break order.
    pub separators: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            tz: TimeZoneSpec::Local,
            support_periods: true,
            always_return_period: true,
            strict: true,
            date_order: DateOrder::MonthFirst,
            skeletons: DEFAULT_SKELETONS.iter().map(ToString::to_string).collect(),
            unfiltered_words: Self::default_unfiltered_words(),
            replaced_words: Self::default_replaced_words(),
            separators: DEFAULT_SEPARATORS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ParserConfig {
    /// Month and weekday abbreviations, stripped separators, and the
    /// relative words the phrase table understands.
    #[must_use]
    pub fn default_unfiltered_words() -> Vec<String> {
        MONTHS
            .iter()
            .map(|(_, abbr)| *abbr)
            .chain(WEEKDAYS.iter().map(|(_, abbr, _)| *abbr))
            .chain(DEFAULT_SEPARATORS.iter().map(|s| s.trim()))
            .chain(RELATIVE_WORDS)
            .map(ToString::to_string)
            .collect()
    }

    /// `last` → `previous`, `current` → `this`, then full weekday and month
    /// names → abbreviations.
    #[must_use]
    pub fn default_replaced_words() -> Vec<(String, String)> {
        [("last", "previous"), ("current", "this")]
            .into_iter()
            .chain(WEEKDAYS.iter().map(|(full, abbr, _)| (*full, *abbr)))
            .chain(MONTHS)
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect()
    }

    #[must_use]
    pub fn with_tz(mut self, tz: TimeZoneSpec) -> Self {
        self.tz = tz;
        self
    }

    #[must_use]
    pub fn with_periods(mut self, support_periods: bool) -> Self {
        self.support_periods = support_periods;
        self
    }

    #[must_use]
    pub fn with_always_period(mut self, always_return_period: bool) -> Self {
        self.always_return_period = always_return_period;
        self
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn with_date_order(mut self, date_order: DateOrder) -> Self {
        self.date_order = date_order;
        self
    }

    #[must_use]
    pub fn with_skeletons<I, S>(mut self, skeletons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skeletons = skeletons.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_unfiltered_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unfiltered_words = words.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_replaced_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        self.replaced_words = words
            .into_iter()
            .map(|(from, to)| (from.into(), to.into()))
            .collect();
        self
    }

    #[must_use]
    pub fn with_separators<I, S>(mut self, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.separators = separators.into_iter().map(Into::into).collect();
        self
    }

    /// Check the parts that do not depend on template compilation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.skeletons.is_empty() {
            return Err(ConfigError::NoSkeletons);
        }
        if self.separators.iter().any(String::is_empty) {
            return Err(ConfigError::EmptySeparator);
        }
        Ok(())
    }
}
