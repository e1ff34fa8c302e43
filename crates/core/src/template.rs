//! Structural date templates.
//!
//! A skeleton such as `{d} [Of] {m} {y}` is instantiated with every rendering
//! code of every token family, giving concrete templates like
//! `DD [Of] MMM YYYY`. The generator deliberately over-produces; the matcher
//! relies on [`priority_cmp`] and the strict length check to pick the right
//! one.
//!
//! Skeleton syntax:
//! - `{d}`, `{m}`, `{y}`, `{t}`: day, month, year and time-of-day placeholders
//! - `[text]`: a literal that may be omitted in the input, together with the
//!   spaces that follow it
//! - anything else: a literal that must appear as written (case-insensitive)

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Captures, Regex};

use crate::calendar::MONTHS;
use crate::config::DateOrder;
use crate::error::{ConfigError, TemplateParseError};

/// The date component a placeholder stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenFamily {
    Day,
    Month,
    Year,
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCode {
    /// `DD`: two digits, `05`
    TwoDigit,
    /// `D`: one or two digits, `5`
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthCode {
    /// `MMMM`: `March`
    Full,
    /// `MMM`: `Mar`
    Abbreviated,
    /// `MM`: `03`
    Numeric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearCode {
    /// `YYYY`: `2020`
    Full,
    /// `YY`: `20`
    TwoDigit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeCode {
    /// `h:mm A`: `3:04 PM`
    Minutes,
    /// `h:mm:ss A`: `3:04:05 PM`
    Seconds,
}

impl DayCode {
    pub const ALL: [Self; 2] = [Self::TwoDigit, Self::Short];

    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::TwoDigit => "DD",
            Self::Short => "D",
        }
    }
}

impl MonthCode {
    pub const ALL: [Self; 3] = [Self::Full, Self::Abbreviated, Self::Numeric];

    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Full => "MMMM",
            Self::Abbreviated => "MMM",
            Self::Numeric => "MM",
        }
    }
}

impl YearCode {
    pub const ALL: [Self; 2] = [Self::Full, Self::TwoDigit];

    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Full => "YYYY",
            Self::TwoDigit => "YY",
        }
    }
}

impl TimeCode {
    pub const ALL: [Self; 2] = [Self::Minutes, Self::Seconds];

    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Minutes => "h:mm A",
            Self::Seconds => "h:mm:ss A",
        }
    }

    /// Characters taken by the zero-padded rendering (`03:04 PM`).
    fn width(self) -> usize {
        match self {
            Self::Minutes => 8,
            Self::Seconds => 11,
        }
    }

    fn chrono_format(self) -> &'static str {
        match self {
            Self::Minutes => "%I:%M %p",
            Self::Seconds => "%I:%M:%S %p",
        }
    }
}

/// One piece of a parsed skeleton.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SkeletonPart {
    Placeholder(TokenFamily),
    Literal(String),
    Optional { text: String, tail: String },
}

/// A parsed skeleton, before instantiation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Skeleton {
    parts: Vec<SkeletonPart>,
}

impl Skeleton {
    fn parse(source: &str) -> Result<Self, ConfigError> {
        let invalid = |message: &str| ConfigError::InvalidSkeleton {
            skeleton: source.to_string(),
            message: message.to_string(),
        };

        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' => {
                    let name: String = chars.by_ref().take_while(|&c| c != '}').collect();
                    let family = match name.as_str() {
                        "d" => TokenFamily::Day,
                        "m" => TokenFamily::Month,
                        "y" => TokenFamily::Year,
                        "t" => TokenFamily::Time,
                        _ => return Err(invalid(&format!("unknown placeholder {{{name}}}"))),
                    };
                    if !literal.is_empty() {
                        parts.push(SkeletonPart::Literal(std::mem::take(&mut literal)));
                    }
                    parts.push(SkeletonPart::Placeholder(family));
                }
                '[' => {
                    let mut text = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == ']' {
                            closed = true;
                            break;
                        }
                        text.push(c);
                    }
                    if !closed {
                        return Err(invalid("unclosed '['"));
                    }
                    let mut tail = String::new();
                    while let Some(&' ') = chars.peek() {
                        tail.push(' ');
                        chars.next();
                    }
                    if !literal.is_empty() {
                        parts.push(SkeletonPart::Literal(std::mem::take(&mut literal)));
                    }
                    parts.push(SkeletonPart::Optional { text, tail });
                }
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            parts.push(SkeletonPart::Literal(literal));
        }

        // `{d` without a closing brace swallows the rest of the skeleton
        if source.matches('{').count() != source.matches('}').count() {
            return Err(invalid("unbalanced '{'"));
        }
        if !parts.iter().any(|p| matches!(p, SkeletonPart::Placeholder(_))) {
            return Err(invalid("no placeholders"));
        }
        Ok(Self { parts })
    }

    fn instantiate(
        &self,
        day: DayCode,
        month: MonthCode,
        year: YearCode,
        time: TimeCode,
    ) -> Vec<Segment> {
        self.parts
            .iter()
            .map(|part| match part {
                SkeletonPart::Placeholder(TokenFamily::Day) => Segment::Day(day),
                SkeletonPart::Placeholder(TokenFamily::Month) => Segment::Month(month),
                SkeletonPart::Placeholder(TokenFamily::Year) => Segment::Year(year),
                SkeletonPart::Placeholder(TokenFamily::Time) => Segment::Time(time),
                SkeletonPart::Literal(text) => Segment::Literal(text.clone()),
                SkeletonPart::Optional { text, tail } => Segment::Optional {
                    text: text.clone(),
                    tail: tail.clone(),
                },
            })
            .collect()
    }
}

/// One piece of a concrete template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Day(DayCode),
    Month(MonthCode),
    Year(YearCode),
    Time(TimeCode),
    Literal(String),
    Optional { text: String, tail: String },
}

impl Segment {
    fn render(&self, out: &mut String) {
        match self {
            Self::Day(code) => out.push_str(code.token()),
            Self::Month(code) => out.push_str(code.token()),
            Self::Year(code) => out.push_str(code.token()),
            Self::Time(code) => out.push_str(code.token()),
            Self::Literal(text) => out.push_str(text),
            Self::Optional { text, tail } => {
                out.push('[');
                out.push_str(text);
                out.push(']');
                out.push_str(tail);
            }
        }
    }

    /// Characters this segment contributes to the strict length: its token
    /// for date codes, literal text without brackets.
    fn width(&self) -> usize {
        match self {
            Self::Day(code) => code.token().len(),
            Self::Month(code) => code.token().len(),
            Self::Year(code) => code.token().len(),
            Self::Time(code) => code.width(),
            Self::Literal(text) => text.chars().count(),
            Self::Optional { text, tail } => text.chars().count() + tail.len(),
        }
    }

    fn pattern(&self, out: &mut String) {
        match self {
            Self::Day(_) => out.push_str(r"(?P<day>\d{1,2})"),
            Self::Month(MonthCode::Full) => {
                let names: Vec<_> = MONTHS.iter().map(|(full, _)| *full).collect();
                out.push_str(&format!("(?P<month_name>{})", names.join("|")));
            }
            Self::Month(MonthCode::Abbreviated) => {
                let names: Vec<_> = MONTHS.iter().map(|(_, abbr)| *abbr).collect();
                out.push_str(&format!("(?P<month_name>{})", names.join("|")));
            }
            Self::Month(MonthCode::Numeric) => out.push_str(r"(?P<month>\d{1,2})"),
            Self::Year(YearCode::Full) => out.push_str(r"(?P<year>\d{1,4})"),
            Self::Year(YearCode::TwoDigit) => out.push_str(r"(?P<short_year>\d{2})"),
            Self::Time(TimeCode::Minutes) => {
                out.push_str(r"(?P<hour>\d{1,2}):(?P<minute>\d{2}) (?P<meridiem>am|pm)");
            }
            Self::Time(TimeCode::Seconds) => out.push_str(
                r"(?P<hour>\d{1,2}):(?P<minute>\d{2}):(?P<second>\d{2}) (?P<meridiem>am|pm)",
            ),
            Self::Literal(text) => out.push_str(&regex::escape(text)),
            Self::Optional { text, tail } => {
                out.push_str("(?:");
                out.push_str(&regex::escape(text));
                out.push_str(&regex::escape(tail));
                out.push_str(")?");
            }
        }
    }
}

/// Fields extracted by a successful template match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateMatch {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub time: Option<NaiveTime>,
}

impl TemplateMatch {
    /// Build a date-time, filling missing fields with `default_year`,
    /// January, the 1st and midnight.
    #[must_use]
    pub fn to_datetime(&self, default_year: i32) -> Option<NaiveDateTime> {
        let date = NaiveDate::from_ymd_opt(
            self.year.unwrap_or(default_year),
            self.month.unwrap_or(1),
            self.day.unwrap_or(1),
        )?;
        Some(date.and_time(self.time.unwrap_or(NaiveTime::MIN)))
    }
}

/// A concrete template: one instantiation of a skeleton.
#[derive(Debug, Clone)]
pub struct Template {
    segments: Vec<Segment>,
    rendered: String,
    pattern: Regex,
}

impl Template {
    fn new(segments: Vec<Segment>) -> Result<Self, ConfigError> {
        let rendered = render(&segments);
        let mut source = String::from("(?i)^");
        for segment in &segments {
            segment.pattern(&mut source);
        }
        source.push('$');
        let pattern = Regex::new(&source).map_err(|e| ConfigError::InvalidSkeleton {
            skeleton: rendered.clone(),
            message: e.to_string(),
        })?;
        Ok(Self {
            segments,
            rendered,
            pattern,
        })
    }

    /// Token form, e.g. `D [Of] MMM YYYY`.
    #[must_use]
    pub fn render(&self) -> &str {
        &self.rendered
    }

    /// Length an input must have to match in strict mode.
    #[must_use]
    pub fn strict_len(&self) -> usize {
        self.segments.iter().map(Segment::width).sum()
    }

    #[must_use]
    pub fn has_year(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Year(_)))
    }

    /// Format `dt` the way this template reads it.
    #[must_use]
    pub fn format(&self, dt: NaiveDateTime) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Day(DayCode::TwoDigit) => out.push_str(&format!("{:02}", dt.day())),
                Segment::Day(DayCode::Short) => out.push_str(&dt.day().to_string()),
                Segment::Month(code) => {
                    let (full, abbr) = MONTHS[dt.month0() as usize];
                    match code {
                        MonthCode::Full => out.push_str(&crate::normalize::title_case(full)),
                        MonthCode::Abbreviated => out.push_str(&crate::normalize::title_case(abbr)),
                        MonthCode::Numeric => out.push_str(&format!("{:02}", dt.month())),
                    }
                }
                Segment::Year(YearCode::Full) => out.push_str(&format!("{:04}", dt.year())),
                Segment::Year(YearCode::TwoDigit) => {
                    out.push_str(&format!("{:02}", dt.year().rem_euclid(100)));
                }
                Segment::Time(code) => out.push_str(&dt.format(code.chrono_format()).to_string()),
                Segment::Literal(text) => out.push_str(text),
                Segment::Optional { text, tail } => {
                    out.push_str(text);
                    out.push_str(tail);
                }
            }
        }
        out
    }

    /// Match the whole of `input` against this template.
    pub fn parse(&self, input: &str) -> Result<TemplateMatch, TemplateParseError> {
        let caps = self
            .pattern
            .captures(input)
            .ok_or_else(|| TemplateParseError::NoMatch {
                input: input.to_string(),
                template: self.rendered.clone(),
            })?;
        self.extract(&caps).ok_or_else(|| TemplateParseError::InvalidDate {
            input: input.to_string(),
            template: self.rendered.clone(),
        })
    }

    fn extract(&self, caps: &Captures<'_>) -> Option<TemplateMatch> {
        let number = |name: &str| -> Option<Option<u32>> {
            match caps.name(name) {
                Some(m) => m.as_str().parse().ok().map(Some),
                None => Some(None),
            }
        };

        let day = number("day")?;
        let month = match caps.name("month_name") {
            Some(m) => Some(month_from_name(m.as_str())?),
            None => number("month")?,
        };
        let year = match (number("year")?, number("short_year")?) {
            (Some(full), _) => Some(i32::try_from(full).ok()?),
            (None, Some(short)) => Some(expand_two_digit_year(short)),
            (None, None) => None,
        };
        let time = match number("hour")? {
            Some(hour) => {
                let minute = number("minute")?.unwrap_or(0);
                let second = number("second")?.unwrap_or(0);
                let pm = caps
                    .name("meridiem")
                    .is_some_and(|m| m.as_str().eq_ignore_ascii_case("pm"));
                if !(1..=12).contains(&hour) {
                    return None;
                }
                let hour = hour % 12 + if pm { 12 } else { 0 };
                Some(NaiveTime::from_hms_opt(hour, minute, second)?)
            }
            None => None,
        };

        if let Some(month) = month {
            if !(1..=12).contains(&month) {
                return None;
            }
        }
        if let Some(day) = day {
            if !(1..=31).contains(&day) {
                return None;
            }
        }

        Some(TemplateMatch {
            year,
            month,
            day,
            time,
        })
    }

    fn position(&self, pred: impl Fn(&Segment) -> bool) -> Option<usize> {
        self.segments.iter().position(pred)
    }

    fn month_before_day(&self) -> Option<bool> {
        let month = self.position(|s| matches!(s, Segment::Month(_)))?;
        let day = self.position(|s| matches!(s, Segment::Day(_)))?;
        Some(month < day)
    }
}

impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        self.rendered == other.rendered
    }
}

impl Eq for Template {}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

fn render(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        segment.render(&mut out);
    }
    out
}

fn month_from_name(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    MONTHS
        .iter()
        .position(|(full, abbr)| *full == name || *abbr == name)
        .and_then(|i| u32::try_from(i + 1).ok())
}

/// `YY` covers 1969 to 2068.
fn expand_two_digit_year(short: u32) -> i32 {
    let short = i32::try_from(short).unwrap_or(0);
    if short > 68 {
        1900 + short
    } else {
        2000 + short
    }
}

/// Specificity order, most specific first:
/// 4-digit year, month name, numeric month, 2-digit day, shorter template,
/// then the configured numeric date order, then the token text.
#[must_use]
pub fn priority_cmp(a: &Template, b: &Template, order: DateOrder) -> Ordering {
    fn features(t: &Template) -> [bool; 4] {
        let has = |pred: fn(&Segment) -> bool| t.segments.iter().any(pred);
        [
            has(|s| matches!(s, Segment::Year(YearCode::Full))),
            has(|s| matches!(s, Segment::Month(MonthCode::Full | MonthCode::Abbreviated))),
            has(|s| matches!(s, Segment::Month(MonthCode::Numeric))),
            has(|s| matches!(s, Segment::Day(DayCode::TwoDigit))),
        ]
    }

    let preferred = |t: &Template| {
        t.month_before_day()
            .is_some_and(|month_first| month_first == (order == DateOrder::MonthFirst))
    };

    features(b)
        .cmp(&features(a))
        .then_with(|| a.rendered.chars().count().cmp(&b.rendered.chars().count()))
        .then_with(|| preferred(b).cmp(&preferred(a)))
        .then_with(|| a.rendered.cmp(&b.rendered))
}

/// Instantiate every skeleton with every code combination, collapse
/// duplicates, and sort by [`priority_cmp`].
pub fn generate<S: AsRef<str>>(
    skeletons: &[S],
    order: DateOrder,
) -> Result<Vec<Template>, ConfigError> {
    if skeletons.is_empty() {
        return Err(ConfigError::NoSkeletons);
    }
    let parsed = skeletons
        .iter()
        .map(|s| Skeleton::parse(s.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut unique: BTreeMap<String, Vec<Segment>> = BTreeMap::new();
    for skeleton in &parsed {
        for day in DayCode::ALL {
            for month in MonthCode::ALL {
                for year in YearCode::ALL {
                    for time in TimeCode::ALL {
                        let segments = skeleton.instantiate(day, month, year, time);
                        unique.entry(render(&segments)).or_insert(segments);
                    }
                }
            }
        }
    }

    let mut templates = unique
        .into_values()
        .map(Template::new)
        .collect::<Result<Vec<_>, _>>()?;
    templates.sort_by(|a, b| priority_cmp(a, b, order));
    Ok(templates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SKELETONS;

    fn defaults() -> Vec<Template> {
        generate(&DEFAULT_SKELETONS, DateOrder::MonthFirst).unwrap()
    }

    fn find<'a>(templates: &'a [Template], rendered: &str) -> &'a Template {
        templates
            .iter()
            .find(|t| t.render() == rendered)
            .unwrap_or_else(|| panic!("no template {rendered}"))
    }

    fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_default_set_size() {
        // yearless skeletons: 2 day codes x 3 month codes; full: x 2 year codes
        assert_eq!(defaults().len(), 2 * 6 + 2 * 12);
    }

    #[test]
    fn test_duplicates_collapse() {
        let templates = generate(&["{m} {d}", "{m} {d}"], DateOrder::MonthFirst).unwrap();
        assert_eq!(templates.len(), 6);
    }

    #[test]
    fn test_priority_order() {
        let templates = defaults();
        let rendered: Vec<_> = templates.iter().map(Template::render).collect();
        assert_eq!(rendered[0], "MMM DD YYYY");
        assert_eq!(rendered[1], "MMMM DD YYYY");
        let position = |r: &str| rendered.iter().position(|x| *x == r).unwrap();
        // 4-digit year beats everything without it
        assert!(position("MM D YYYY") < position("MMM DD"));
        // month names beat numeric months
        assert!(position("MMM D YY") < position("MM DD YY"));
        // 2-digit day beats short day
        assert!(position("MMM DD YY") < position("MMM D YY"));
        // shorter template wins otherwise
        assert!(position("MMM DD") < position("MMM DD YY"));
        assert!(position("MM DD YYYY") < position("DD [Of] MM YYYY"));
    }

    #[test]
    fn test_date_order_breaks_ties() {
        let skeletons = ["{m} {d} {y}", "{d} {m} {y}"];
        let month_first = generate(&skeletons, DateOrder::MonthFirst).unwrap();
        let day_first = generate(&skeletons, DateOrder::DayFirst).unwrap();

        let first_numeric = |ts: &[Template]| {
            ts.iter()
                .find(|t| t.render().contains("MM") && !t.render().contains("MMM"))
                .map(|t| t.render().to_string())
                .unwrap()
        };
        assert_eq!(first_numeric(&month_first), "MM DD YYYY");
        assert_eq!(first_numeric(&day_first), "DD MM YYYY");
    }

    #[test]
    fn test_strict_len_excludes_brackets_only() {
        let templates = defaults();
        assert_eq!(find(&templates, "D [Of] MMM YYYY").strict_len(), "D Of MMM YYYY".len());
        assert_eq!(find(&templates, "MMM DD").strict_len(), 6);
    }

    #[test]
    fn test_parse_extracts_fields() {
        let templates = defaults();
        let m = find(&templates, "MMM D YYYY").parse("Mar 5 2020").unwrap();
        assert_eq!(
            m,
            TemplateMatch {
                year: Some(2020),
                month: Some(3),
                day: Some(5),
                time: None
            }
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let templates = defaults();
        assert!(find(&templates, "MMM DD").parse("mAR 05").is_ok());
    }

    #[test]
    fn test_optional_literal_may_be_omitted() {
        let templates = defaults();
        let t = find(&templates, "D [Of] MMM YYYY");
        assert_eq!(t.parse("5 Of Mar 2020").unwrap().day, Some(5));
        assert_eq!(t.parse("5 Mar 2020").unwrap().month, Some(3));
        assert!(t.parse("5 In Mar 2020").is_err());
    }

    #[test]
    fn test_parse_requires_whole_input() {
        let templates = defaults();
        let err = find(&templates, "MMM D YYYY").parse("Mar 5 2020 X1").unwrap_err();
        assert!(matches!(err, TemplateParseError::NoMatch { .. }));
    }

    #[test]
    fn test_two_digit_year_pivot() {
        let templates = defaults();
        let t = find(&templates, "MMM D YY");
        assert_eq!(t.parse("Jan 1 18").unwrap().year, Some(2018));
        assert_eq!(t.parse("Jan 1 68").unwrap().year, Some(2068));
        assert_eq!(t.parse("Jan 1 69").unwrap().year, Some(1969));
    }

    #[test]
    fn test_full_year_accepts_short_numbers() {
        let templates = defaults();
        assert_eq!(find(&templates, "MMM D YYYY").parse("Jan 1 18").unwrap().year, Some(18));
    }

    #[test]
    fn test_out_of_range_fields_are_invalid() {
        let templates = defaults();
        let err = find(&templates, "MM DD YYYY").parse("13 01 2020").unwrap_err();
        assert!(matches!(err, TemplateParseError::InvalidDate { .. }));
        // day 31 is in range for the pattern; the calendar rejects it later
        let m = find(&templates, "MM DD YYYY").parse("02 31 2020").unwrap();
        assert_eq!(m.to_datetime(2020), None);
    }

    #[test]
    fn test_missing_fields_default() {
        let m = TemplateMatch {
            month: Some(7),
            ..TemplateMatch::default()
        };
        assert_eq!(m.to_datetime(2031), Some(dt(2031, 7, 1)));
    }

    #[test]
    fn test_format_round_trips_through_parse() {
        let templates = defaults();
        let date = dt(2019, 11, 7);
        for t in &templates {
            let text = t.format(date);
            let m = t.parse(&text).unwrap_or_else(|e| panic!("{t}: {e}"));
            let expected_year = if t.has_year() { Some(2019) } else { None };
            assert_eq!(m.year, expected_year, "{t} -> {text}");
            assert_eq!((m.month, m.day), (Some(11), Some(7)), "{t} -> {text}");
        }
    }

    #[test]
    fn test_format_renders_each_code() {
        let templates = defaults();
        let date = dt(2018, 6, 1);
        assert_eq!(find(&templates, "MMMM DD YYYY").format(date), "June 01 2018");
        assert_eq!(find(&templates, "D [Of] MMM YY").format(date), "1 Of Jun 18");
        assert_eq!(find(&templates, "MM D").format(date), "06 1");
    }

    #[test]
    fn test_time_templates() {
        let templates = generate(&["{m} {d} {y} {t}"], DateOrder::MonthFirst).unwrap();
        let t = find(&templates, "MMM DD YYYY h:mm A");
        let m = t.parse("Mar 05 2020 3:04 Pm").unwrap();
        assert_eq!(m.time, NaiveTime::from_hms_opt(15, 4, 0));

        let t = find(&templates, "MMM DD YYYY h:mm:ss A");
        let m = t.parse("Mar 05 2020 12:30:15 am").unwrap();
        assert_eq!(m.time, NaiveTime::from_hms_opt(0, 30, 15));
        assert_eq!(t.format(dt(2020, 3, 5)), "Mar 05 2020 12:00:00 AM");
        assert_eq!(t.strict_len(), "Mar 05 2020 12:00:00 AM".len());

        assert!(find(&templates, "MMM DD YYYY h:mm A").parse("Mar 05 2020 13:04 pm").is_err());
    }

    #[test]
    fn test_invalid_skeletons() {
        for bad in ["{q} {d}", "{d} [Of {m}", "of the", "{m} {d"] {
            assert!(
                matches!(
                    generate(&[bad], DateOrder::MonthFirst),
                    Err(ConfigError::InvalidSkeleton { .. })
                ),
                "{bad} should be rejected"
            );
        }
        let empty: [&str; 0] = [];
        assert_eq!(
            generate(&empty, DateOrder::MonthFirst).unwrap_err(),
            ConfigError::NoSkeletons
        );
    }

    #[test]
    fn test_repeated_placeholder_is_rejected() {
        assert!(generate(&["{d} {d}"], DateOrder::MonthFirst).is_err());
    }
}
