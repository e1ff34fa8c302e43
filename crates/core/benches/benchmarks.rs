//! Benchmarks for datespan-core.
//!
//! Run with: `cargo bench -p datespan-core`
//!
//! Results are saved to `target/criterion/` with HTML reports.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use datespan_core::{DateParser, FixedClock, ParserConfig, PhraseTable};

/// Inputs covering each resolution path.
const INPUTS: [(&str, &str); 7] = [
    ("phrase", "next friday"),
    ("period_phrase", "last month"),
    ("explicit_date", "January 15, 2020"),
    ("day_of_month", "the 5th of march 2021"),
    ("numeric", "03/04/2020"),
    ("range", "jan 1st - 03/04/2020"),
    ("unparseable", "not a date"),
];

fn parser(config: ParserConfig) -> DateParser {
    let now = NaiveDate::from_ymd_opt(2024, 1, 5)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    DateParser::with_config(config)
        .unwrap()
        .with_clock(FixedClock(now))
}

/// Resolution against the cached phrase table.
fn bench_resolve_cached(c: &mut Criterion) {
    let parser = parser(ParserConfig::default());

    let mut group = c.benchmark_group("resolve_cached");

    for (name, input) in INPUTS {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("input", name), &input, |b, input| {
            b.iter(|| parser.resolve_cached(black_box(input)));
        });
    }

    group.finish();
}

/// Resolution including the phrase table rebuild.
fn bench_resolve_refresh(c: &mut Criterion) {
    let mut parser = parser(ParserConfig::default());

    let mut group = c.benchmark_group("resolve_refresh");

    for (name, input) in [INPUTS[0], INPUTS[2], INPUTS[5]] {
        group.bench_with_input(BenchmarkId::new("input", name), &input, |b, input| {
            b.iter(|| parser.resolve(black_box(input)));
        });
    }

    group.finish();
}

/// Lenient mode stops at the first matching template instead of filtering
/// by length first.
fn bench_resolve_lenient(c: &mut Criterion) {
    let parser = parser(ParserConfig::default().with_strict(false));

    let mut group = c.benchmark_group("resolve_lenient");

    for (name, input) in INPUTS {
        group.bench_with_input(BenchmarkId::new("input", name), &input, |b, input| {
            b.iter(|| parser.resolve_cached(black_box(input)));
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let parser = parser(ParserConfig::default());

    c.bench_function("normalize", |b| {
        b.iter(|| parser.normalize(black_box("  the 21st of June, 2019 through next Friday ")));
    });
}

fn bench_phrase_table(c: &mut Criterion) {
    let now = NaiveDate::from_ymd_opt(2024, 1, 5)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();

    c.bench_function("PhraseTable::build", |b| {
        b.iter(|| PhraseTable::build(black_box(now)));
    });
}

/// Template generation and regex compilation.
fn bench_initialization(c: &mut Criterion) {
    c.bench_function("DateParser::new", |b| {
        b.iter(DateParser::new);
    });
}

criterion_group!(
    benches,
    bench_resolve_cached,
    bench_resolve_refresh,
    bench_resolve_lenient,
    bench_normalize,
    bench_phrase_table,
    bench_initialization,
);

criterion_main!(benches);
