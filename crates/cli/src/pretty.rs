//! Human-readable and JSON rendering of resolved expressions.

use chrono::NaiveDateTime;
use colored::Colorize;
use datespan_core::{Period, PhraseTable, ResolveError, Resolved, Template};
use serde::Serialize;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One resolved input, as emitted with `--json`.
#[derive(Debug, Serialize)]
pub struct JsonRecord<'a> {
    pub input: &'a str,
    pub normalized: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Resolved>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> JsonRecord<'a> {
    pub fn new(
        input: &'a str,
        normalized: String,
        outcome: &Result<Resolved, ResolveError>,
    ) -> Self {
        match outcome {
            Ok(resolved) => Self {
                input,
                normalized,
                result: Some(*resolved),
                error: None,
            },
            Err(e) => Self {
                input,
                normalized,
                result: None,
                error: Some(e.to_string()),
            },
        }
    }
}

pub fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

/// Number of calendar days a period touches.
fn day_count(period: &Period) -> i64 {
    (period.end.date() - period.start.date()).num_days() + 1
}

/// `▶ period  2024-01-12 00:00:00 → 2024-01-12 23:59:59  (1 day)`
pub fn format_resolved(resolved: &Resolved) -> String {
    let marker = "▶".cyan();
    match resolved {
        Resolved::Date(dt) => format!(
            "{} {}  {}",
            marker,
            resolved.type_name().bold(),
            format_datetime(*dt)
        ),
        Resolved::Period(period) => {
            let days = day_count(period);
            let unit = if days == 1 { "day" } else { "days" };
            format!(
                "{} {}  {} → {}  {}",
                marker,
                resolved.type_name().bold(),
                format_datetime(period.start),
                format_datetime(period.end),
                format!("({days} {unit})").dimmed()
            )
        }
    }
}

/// Compact single-line form used in pipe mode.
pub fn format_inline(resolved: &Resolved) -> String {
    match resolved {
        Resolved::Date(dt) => format_datetime(*dt),
        Resolved::Period(period) => format!(
            "{} → {}",
            format_datetime(period.start),
            format_datetime(period.end)
        ),
    }
}

pub fn format_error(error: &ResolveError) -> String {
    format!("{}: {}", "error".red().bold(), error)
}

/// Templates in priority order with their strict length.
pub fn format_templates(templates: &[Template]) -> Vec<String> {
    let width = templates
        .iter()
        .map(|t| t.render().chars().count())
        .max()
        .unwrap_or(0);
    templates
        .iter()
        .enumerate()
        .map(|(i, t)| {
            format!(
                "{:>3}  {:<width$}  {}",
                i + 1,
                t.render(),
                format!("len {}", t.strict_len()).dimmed()
            )
        })
        .collect()
}

/// Date phrases, then period phrases, each in key order.
pub fn format_phrases(table: &PhraseTable) -> Vec<String> {
    let width = table
        .dates()
        .map(|(phrase, _)| phrase.len())
        .max()
        .unwrap_or(0);

    let mut lines = vec![format!("{}", "Dates".bold())];
    lines.extend(
        table
            .dates()
            .map(|(phrase, dt)| format!("  {:<width$}  {}", phrase, format_datetime(dt))),
    );
    lines.push(format!("{}", "Periods".bold()));
    lines.extend(table.periods().map(|(phrase, period)| {
        format!(
            "  {:<width$}  {} → {}",
            phrase,
            format_datetime(period.start),
            format_datetime(period.end)
        )
    }));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use datespan_core::calendar::{end_of, midnight, Unit};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        midnight(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_format_single_day_period() {
        plain();
        let resolved = Resolved::Period(Period::day_of(at(2024, 1, 12)));
        assert_eq!(
            format_resolved(&resolved),
            "▶ period  2024-01-12 00:00:00 → 2024-01-12 23:59:59  (1 day)"
        );
    }

    #[test]
    fn test_format_multi_day_period() {
        plain();
        let feb = at(2024, 2, 1);
        let resolved = Resolved::Period(Period::new(feb, end_of(Unit::Month, feb)));
        assert!(format_resolved(&resolved).ends_with("(29 days)"));
    }

    #[test]
    fn test_format_date() {
        plain();
        assert_eq!(
            format_resolved(&Resolved::Date(at(2020, 3, 4))),
            "▶ date  2020-03-04 00:00:00"
        );
        assert_eq!(format_inline(&Resolved::Date(at(2020, 3, 4))), "2020-03-04 00:00:00");
    }

    #[test]
    fn test_json_record_for_error() {
        let outcome = Err(ResolveError::UnparseableDate {
            input: String::new(),
        });
        let record = JsonRecord::new("not a date", String::new(), &outcome);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["input"], "not a date");
        assert_eq!(json["error"], "unsupported date string ");
        assert!(json.get("result").is_none());
    }

    #[test]
    fn test_phrase_listing_has_both_sections() {
        plain();
        let lines = format_phrases(&PhraseTable::build(at(2024, 1, 5)));
        assert_eq!(lines[0], "Dates");
        assert!(lines.iter().any(|l| l == "Periods"));
        assert!(lines.iter().any(|l| l.trim_start().starts_with("next fri")));
    }
}
