//! Core types for datespan.
//!
//! All values are wall-clock date-times in the parser's configured zone.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::calendar::{self, Unit};

/// An inclusive interval of wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Period {
    /// Create a period, swapping the bounds if they are given out of order.
    #[must_use]
    pub fn new(a: NaiveDateTime, b: NaiveDateTime) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// The whole calendar day containing `dt`, starting at `dt` itself.
    #[must_use]
    pub fn day_of(dt: NaiveDateTime) -> Self {
        Self::new(dt, calendar::end_of(Unit::Day, dt))
    }

    /// Whether `dt` falls inside the period (bounds included).
    #[must_use]
    pub fn contains(&self, dt: NaiveDateTime) -> bool {
        self.start <= dt && dt <= self.end
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

/// The outcome of resolving an expression: exactly one of a date or a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Resolved {
    Date(NaiveDateTime),
    Period(Period),
}

impl Resolved {
    /// Returns the type name as a string.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Date(_) => "date",
            Self::Period(_) => "period",
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Date(dt) => Some(*dt),
            Self::Period(_) => None,
        }
    }

    #[must_use]
    pub fn as_period(&self) -> Option<Period> {
        match self {
            Self::Date(_) => None,
            Self::Period(p) => Some(*p),
        }
    }

    /// The earliest instant covered by the result.
    #[must_use]
    pub fn start(&self) -> NaiveDateTime {
        match self {
            Self::Date(dt) => *dt,
            Self::Period(p) => p.start,
        }
    }
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(dt) => write!(f, "{dt}"),
            Self::Period(p) => write!(f, "{p}"),
        }
    }
}
