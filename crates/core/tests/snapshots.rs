//! Snapshot tests for template ordering and resolved output.
//!
//! These tests ensure that template priority and the serialized shape of
//! results remain stable. If a change is intentional, update snapshots with:
//! `cargo insta review`

use chrono::NaiveDate;
use datespan_core::{DateParser, FixedClock, Template};
use insta::{assert_json_snapshot, with_settings};
use serde_json::json;

/// Snapshot settings that keep map output deterministic.
macro_rules! stable_snapshot {
    ($name:expr, $value:expr) => {
        with_settings!({
            // Sort maps for deterministic output
            sort_maps => true,
        }, {
            assert_json_snapshot!($name, $value);
        });
    };
}

fn parser() -> DateParser {
    let now = NaiveDate::from_ymd_opt(2024, 1, 5)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    DateParser::new().with_clock(FixedClock(now))
}

#[test]
fn test_snapshot_default_template_order() {
    let parser = parser();
    let order: Vec<&str> = parser.templates().iter().map(Template::render).collect();

    stable_snapshot!("default_template_order", &order);
}

#[test]
fn test_snapshot_resolved_examples() {
    let mut parser = parser();
    let examples: Vec<_> = [
        "today",
        "next friday",
        "last month",
        "jan 1st - 03/04/2020",
        "the 5th of march 2021",
    ]
    .into_iter()
    .map(|input| json!({ "input": input, "result": parser.resolve(input).unwrap() }))
    .collect();

    stable_snapshot!("resolved_examples", &examples);
}
