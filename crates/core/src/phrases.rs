//! Relative phrases such as `next fri` or `this month`.
//!
//! A [`PhraseTable`] is an immutable snapshot built from one instant. Keys are
//! normalized phrases (lowercase, abbreviated names); rebuilding the table is
//! the only way to move "now" forward.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::calendar::{self, Unit, MONTHS, WEEKDAYS};
use crate::types::Period;

const UNITS: [(&str, Unit); 3] = [
    ("week", Unit::Week),
    ("month", Unit::Month),
    ("year", Unit::Year),
];

/// Precomputed dates and periods for every supported phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhraseTable {
    now: NaiveDateTime,
    dates: BTreeMap<String, NaiveDateTime>,
    periods: BTreeMap<String, Period>,
}

impl PhraseTable {
    /// Build every phrase relative to `now`.
    #[must_use]
    pub fn build(now: NaiveDateTime) -> Self {
        let mut table = Self {
            now,
            dates: BTreeMap::new(),
            periods: BTreeMap::new(),
        };
        let today = calendar::start_of(Unit::Day, now);

        table.insert_date("now", now);
        table.insert_date("today", today);
        table.insert_date("tomorrow", today + Duration::days(1));
        table.insert_date("yesterday", today - Duration::days(1));

        for (name, unit) in UNITS {
            for (prefix, offset) in [("this", 0), ("next", 1), ("previous", -1)] {
                let anchor = shift(unit, today, offset);
                let period = Period::new(
                    calendar::start_of(unit, anchor),
                    calendar::end_of(unit, anchor),
                );
                let key = format!("{prefix} {name}");
                table.insert_date(&key, period.start);
                table.periods.insert(key, period);
            }
        }

        for (_, abbr, weekday) in WEEKDAYS {
            let next = calendar::next_weekday(now, weekday);
            let upcoming = if today.weekday() == weekday { today } else { next };
            table.insert_date(abbr, upcoming);
            table.insert_date(&format!("this {abbr}"), upcoming);
            table.insert_date(&format!("next {abbr}"), next);
            table.insert_date(
                &format!("previous {abbr}"),
                calendar::previous_weekday(now, weekday),
            );
        }

        let year = today.year();
        let current = today.month();
        for (month, (_, abbr)) in (1u32..).zip(MONTHS) {
            let next_year = if month > current { year } else { year + 1 };
            let previous_year = if month < current { year } else { year - 1 };
            let entries = [
                (abbr.to_string(), first_of(year, month)),
                (format!("this {abbr}"), first_of(year, month)),
                (format!("next {abbr}"), first_of(next_year, month)),
                (format!("previous {abbr}"), first_of(previous_year, month)),
            ];
            for (key, start) in entries {
                let Some(start) = start else { continue };
                table.insert_date(&key, start);
                table
                    .periods
                    .insert(key, Period::new(start, calendar::end_of(Unit::Month, start)));
            }
        }

        table
    }

    fn insert_date(&mut self, key: &str, dt: NaiveDateTime) {
        self.dates.insert(key.to_string(), dt);
    }

    /// The instant this table was built from.
    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    #[must_use]
    pub fn lookup_date(&self, phrase: &str) -> Option<NaiveDateTime> {
        self.dates.get(phrase).copied()
    }

    #[must_use]
    pub fn lookup_period(&self, phrase: &str) -> Option<Period> {
        self.periods.get(phrase).copied()
    }

    /// Date phrases in key order.
    pub fn dates(&self) -> impl Iterator<Item = (&str, NaiveDateTime)> {
        self.dates.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Period phrases in key order.
    pub fn periods(&self) -> impl Iterator<Item = (&str, Period)> {
        self.periods.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

fn shift(unit: Unit, dt: NaiveDateTime, offset: i32) -> NaiveDateTime {
    match unit {
        Unit::Day => dt + Duration::days(i64::from(offset)),
        Unit::Week => dt + Duration::weeks(i64::from(offset)),
        Unit::Month => calendar::add_months(calendar::start_of(Unit::Month, dt), offset),
        Unit::Year => calendar::add_years(calendar::start_of(Unit::Year, dt), offset),
    }
}

fn first_of(year: i32, month: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, 1).map(calendar::midnight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        calendar::midnight(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    /// Friday 2024-01-05, 15:30.
    fn table() -> PhraseTable {
        PhraseTable::build(at(2024, 1, 5) + Duration::minutes(15 * 60 + 30))
    }

    #[test]
    fn test_day_phrases() {
        let t = table();
        assert_eq!(t.lookup_date("now").unwrap().hour(), 15);
        assert_eq!(t.lookup_date("today"), Some(at(2024, 1, 5)));
        assert_eq!(t.lookup_date("tomorrow"), Some(at(2024, 1, 6)));
        assert_eq!(t.lookup_date("yesterday"), Some(at(2024, 1, 4)));
    }

    #[test]
    fn test_weekday_phrases_on_matching_day() {
        let t = table();
        assert_eq!(t.lookup_date("fri"), Some(at(2024, 1, 5)));
        assert_eq!(t.lookup_date("this fri"), Some(at(2024, 1, 5)));
        assert_eq!(t.lookup_date("next fri"), Some(at(2024, 1, 12)));
        assert_eq!(t.lookup_date("previous fri"), Some(at(2023, 12, 29)));
    }

    #[test]
    fn test_weekday_phrases_on_other_days() {
        let t = table();
        assert_eq!(t.lookup_date("mon"), Some(at(2024, 1, 8)));
        assert_eq!(t.lookup_date("this mon"), Some(at(2024, 1, 8)));
        assert_eq!(t.lookup_date("next mon"), Some(at(2024, 1, 8)));
        assert_eq!(t.lookup_date("previous mon"), Some(at(2024, 1, 1)));
        assert_eq!(t.lookup_date("sat"), Some(at(2024, 1, 6)));
    }

    #[test]
    fn test_month_phrases() {
        let t = table();
        assert_eq!(t.lookup_date("jan"), Some(at(2024, 1, 1)));
        assert_eq!(t.lookup_date("next jan"), Some(at(2025, 1, 1)));
        assert_eq!(t.lookup_date("previous jan"), Some(at(2023, 1, 1)));
        assert_eq!(t.lookup_date("this mar"), Some(at(2024, 3, 1)));
        assert_eq!(t.lookup_date("next mar"), Some(at(2024, 3, 1)));
        assert_eq!(t.lookup_date("previous mar"), Some(at(2023, 3, 1)));
        assert_eq!(t.lookup_date("previous dec"), Some(at(2023, 12, 1)));
    }

    #[test]
    fn test_month_phrase_periods() {
        let feb = table().lookup_period("feb").unwrap();
        assert_eq!(feb.start, at(2024, 2, 1));
        assert_eq!(feb.end.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_unit_periods() {
        let t = table();
        let week = t.lookup_period("this week").unwrap();
        assert_eq!(week.start, at(2024, 1, 1));
        assert_eq!(week.end.date(), NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());

        let next_week = t.lookup_period("next week").unwrap();
        assert_eq!(next_week.start, at(2024, 1, 8));

        let previous_month = t.lookup_period("previous month").unwrap();
        assert_eq!(previous_month.start, at(2023, 12, 1));
        assert_eq!(previous_month.end.date(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());

        let previous_year = t.lookup_period("previous year").unwrap();
        assert_eq!(previous_year.start, at(2023, 1, 1));
        assert_eq!(previous_year.end.date(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());

        let next_year = t.lookup_period("next year").unwrap();
        assert_eq!(next_year.start, at(2025, 1, 1));
    }

    #[test]
    fn test_unit_phrases_are_also_dates() {
        let t = table();
        assert_eq!(t.lookup_date("this month"), Some(at(2024, 1, 1)));
        assert_eq!(t.lookup_date("next week"), Some(at(2024, 1, 8)));
    }

    #[test]
    fn test_weekday_phrases_have_no_period() {
        let t = table();
        assert!(t.lookup_period("fri").is_none());
        assert!(t.lookup_period("today").is_none());
    }

    #[test]
    fn test_table_sizes() {
        let t = table();
        // 4 day words, 9 unit phrases, 7 x 4 weekday phrases, 12 x 4 month phrases
        assert_eq!(t.dates().count(), 4 + 9 + 28 + 48);
        assert_eq!(t.periods().count(), 9 + 48);
    }

    #[test]
    fn test_rebuild_moves_with_now() {
        let later = PhraseTable::build(at(2024, 1, 6));
        assert_eq!(later.lookup_date("fri"), Some(at(2024, 1, 12)));
        assert_eq!(later.now(), at(2024, 1, 6));
    }
}
