//! Calendar primitives and the source of "now".
//!
//! Thin adapter over chrono: start/end of a unit, month arithmetic that
//! clamps to the end of shorter months, and weekday navigation. Everything
//! works on wall-clock [`NaiveDateTime`] values.

use chrono::{
    Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday,
};

use crate::config::TimeZoneSpec;

/// English month names and their abbreviations, January first.
pub const MONTHS: [(&str, &str); 12] = [
    ("january", "jan"),
    ("february", "feb"),
    ("march", "mar"),
    ("april", "apr"),
    ("may", "may"),
    ("june", "jun"),
    ("july", "jul"),
    ("august", "aug"),
    ("september", "sep"),
    ("october", "oct"),
    ("november", "nov"),
    ("december", "dec"),
];

/// English weekday names and their abbreviations, Sunday first.
pub const WEEKDAYS: [(&str, &str, Weekday); 7] = [
    ("sunday", "sun", Weekday::Sun),
    ("monday", "mon", Weekday::Mon),
    ("tuesday", "tue", Weekday::Tue),
    ("wednesday", "wed", Weekday::Wed),
    ("thursday", "thu", Weekday::Thu),
    ("friday", "fri", Weekday::Fri),
    ("saturday", "sat", Weekday::Sat),
];

/// Calendar units used for period boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Day,
    /// Weeks start on Monday.
    Week,
    Month,
    Year,
}

/// Source of the current wall-clock instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system clock in a configured zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemClock {
    zone: TimeZoneSpec,
}

impl SystemClock {
    #[must_use]
    pub fn new(zone: TimeZoneSpec) -> Self {
        Self { zone }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        match &self.zone {
            TimeZoneSpec::Local => Local::now().naive_local(),
            TimeZoneSpec::Utc => Utc::now().naive_utc(),
            TimeZoneSpec::Named(tz) => Utc::now().with_timezone(tz).naive_local(),
        }
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Midnight at the start of `date`.
#[must_use]
pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn last_instant(date: NaiveDate) -> NaiveDateTime {
    // 23:59:59.999999 is always a valid time of day
    date.and_time(NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap_or(NaiveTime::MIN))
}

/// First instant of the unit containing `dt`.
#[must_use]
pub fn start_of(unit: Unit, dt: NaiveDateTime) -> NaiveDateTime {
    let date = dt.date();
    let start = match unit {
        Unit::Day => date,
        Unit::Week => date - Duration::days(i64::from(date.weekday().num_days_from_monday())),
        Unit::Month => date.with_day(1).unwrap_or(date),
        Unit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
    };
    midnight(start)
}

/// Last instant (23:59:59.999999) of the unit containing `dt`.
#[must_use]
pub fn end_of(unit: Unit, dt: NaiveDateTime) -> NaiveDateTime {
    let date = dt.date();
    let end = match unit {
        Unit::Day => date,
        Unit::Week => start_of(Unit::Week, dt).date() + Duration::days(6),
        Unit::Month => {
            let first = start_of(Unit::Month, dt);
            add_months(first, 1).date() - Duration::days(1)
        }
        Unit::Year => NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date),
    };
    last_instant(end)
}

/// Shift by whole months; the day is clamped to the target month's length
/// (Jan 31 + 1 month = Feb 28/29).
#[must_use]
pub fn add_months(dt: NaiveDateTime, months: i32) -> NaiveDateTime {
    let shifted = if months >= 0 {
        dt.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        dt.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(dt)
}

#[must_use]
pub fn add_years(dt: NaiveDateTime, years: i32) -> NaiveDateTime {
    add_months(dt, years.saturating_mul(12))
}

/// The first `target` strictly after `dt`, at midnight.
#[must_use]
pub fn next_weekday(dt: NaiveDateTime, target: Weekday) -> NaiveDateTime {
    let current = dt.weekday().num_days_from_monday();
    let diff = (7 + target.num_days_from_monday() - current) % 7;
    let forward = if diff == 0 { 7 } else { diff };
    midnight(dt.date() + Duration::days(i64::from(forward)))
}

/// The last `target` strictly before `dt`, at midnight.
#[must_use]
pub fn previous_weekday(dt: NaiveDateTime, target: Weekday) -> NaiveDateTime {
    let current = dt.weekday().num_days_from_monday();
    let diff = (7 + current - target.num_days_from_monday()) % 7;
    let back = if diff == 0 { 7 } else { diff };
    midnight(dt.date() - Duration::days(i64::from(back)))
}
