//! Datespan Core
//!
//! Turns loosely written date expressions ("next friday", "jan 1st - 3/4/2020",
//! "this month") into concrete dates and periods.
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use datespan_core::{DateParser, FixedClock};
//!
//! let now = NaiveDate::from_ymd_opt(2024, 1, 5)
//!     .unwrap()
//!     .and_hms_opt(12, 0, 0)
//!     .unwrap();
//! let mut parser = DateParser::new().with_clock(FixedClock(now));
//!
//! // Single dates are promoted to the whole day by default
//! let period = parser.resolve("next friday").unwrap().as_period().unwrap();
//! assert_eq!(period.start.date(), NaiveDate::from_ymd_opt(2024, 1, 12).unwrap());
//!
//! // Ranges take the earlier bound as start, whatever the input order
//! let range = parser.resolve("mar 3 2024 - jan 1st 2024").unwrap();
//! assert_eq!(range.start().date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
//! ```
//!
//! # Configuration
//!
//! ```
//! use datespan_core::{DateParser, ParserConfig, Resolved};
//!
//! let config = ParserConfig::default()
//!     .with_always_period(false)
//!     .with_strict(false);
//! let parser = DateParser::with_config(config).unwrap();
//!
//! // Lenient matching reads "18" as 2018
//! let resolved = parser.resolve_cached("jan 1 18").unwrap();
//! assert!(matches!(resolved, Resolved::Date(_)));
//! ```

pub mod calendar;
pub mod config;
pub mod error;
pub mod matcher;
pub mod normalize;
pub mod phrases;
pub mod template;
pub mod types;

use std::fmt;

use chrono::NaiveDateTime;

pub use calendar::{Clock, FixedClock, SystemClock};
pub use config::{DateOrder, ParserConfig, TimeZoneSpec};
pub use error::{ConfigError, ResolveError, TemplateParseError};
pub use matcher::Matcher;
pub use normalize::Normalizer;
pub use phrases::PhraseTable;
pub use template::Template;
pub use types::*;

/// Main entry point - a configured parser instance.
///
/// Resolving with a refresh takes `&mut self`; share a parser between
/// threads behind a `Mutex`, or use [`DateParser::resolve_cached`] /
/// [`DateParser::resolve_at`] which only read.
pub struct DateParser {
    config: ParserConfig,
    normalizer: Normalizer,
    matcher: Matcher,
    clock: Box<dyn Clock>,
    phrases: PhraseTable,
}

impl DateParser {
    /// Create a parser with the default configuration and the system clock.
    #[must_use]
    pub fn new() -> Self {
        // The built-in skeletons and separators always compile
        Self::with_config(ParserConfig::default()).expect("default configuration is valid")
    }

    /// Create a parser with a custom configuration.
    pub fn with_config(config: ParserConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let normalizer = Normalizer::new(config.replaced_words.clone(), &config.unfiltered_words);
        let matcher = Matcher::from_config(&config)?;
        let clock: Box<dyn Clock> = Box::new(SystemClock::new(config.tz.clone()));
        let phrases = PhraseTable::build(clock.now());

        tracing::debug!(
            templates = matcher.templates().len(),
            strict = config.strict,
            tz = %config.tz,
            "Built date parser"
        );

        Ok(Self {
            config,
            normalizer,
            matcher,
            clock,
            phrases,
        })
    }

    /// Replace the clock and rebuild the phrase table from it.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self.refresh();
        self
    }

    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Templates in priority order.
    #[must_use]
    pub fn templates(&self) -> &[Template] {
        self.matcher.templates()
    }

    /// The phrase table used by [`DateParser::resolve_cached`].
    #[must_use]
    pub fn phrases(&self) -> &PhraseTable {
        &self.phrases
    }

    /// A copy of the current phrase table, for use with
    /// [`DateParser::resolve_at`].
    #[must_use]
    pub fn snapshot(&self) -> PhraseTable {
        self.phrases.clone()
    }

    /// Run only the normalization pipeline.
    #[must_use]
    pub fn normalize(&self, input: &str) -> String {
        self.normalizer.normalize(input)
    }

    /// Rebuild the phrase table from the clock.
    pub fn refresh(&mut self) -> &PhraseTable {
        self.phrases = PhraseTable::build(self.clock.now());
        tracing::debug!(now = %self.phrases.now(), "Refreshed phrase table");
        &self.phrases
    }

    /// Refresh "now", then resolve `input`.
    pub fn resolve(&mut self, input: &str) -> Result<Resolved, ResolveError> {
        self.resolve_with(input, true)
    }

    pub fn resolve_with(&mut self, input: &str, refresh: bool) -> Result<Resolved, ResolveError> {
        if refresh {
            self.refresh();
        }
        self.resolve_at(input, &self.phrases)
    }

    /// Resolve against the phrase table from the last refresh.
    pub fn resolve_cached(&self, input: &str) -> Result<Resolved, ResolveError> {
        self.resolve_at(input, &self.phrases)
    }

    /// Resolve against an explicit snapshot.
    pub fn resolve_at(&self, input: &str, phrases: &PhraseTable) -> Result<Resolved, ResolveError> {
        if !self.config.support_periods {
            let normalized = self.normalizer.normalize(input);
            let dt = self.matcher.resolve(&normalized, phrases)?;
            return Ok(self.single(dt));
        }

        let substituted = self.normalizer.substitute(input);
        if let Some(period) = phrases.lookup_period(&substituted) {
            tracing::debug!(input, "Matched period phrase");
            return Ok(Resolved::Period(period));
        }

        let parts = self.split_range(&substituted);
        tracing::debug!(input, parts = parts.len(), "Split input");

        match parts.as_slice() {
            [single] => {
                let normalized = self.normalizer.normalize(single);
                let dt = self.matcher.resolve(&normalized, phrases)?;
                Ok(self.single(dt))
            }
            [first, second] => {
                let range_error = |source| ResolveError::UnparseableDateRange {
                    transformed: substituted.clone(),
                    original: input.to_string(),
                    source: Some(Box::new(source)),
                };
                let start = self
                    .range_bound(first, phrases, |p| p.start)
                    .map_err(range_error)?;
                let end = self
                    .range_bound(second, phrases, |p| p.end)
                    .map_err(range_error)?;
                Ok(Resolved::Period(Period::new(start, end)))
            }
            _ => Err(ResolveError::UnparseableDateRange {
                transformed: substituted.clone(),
                original: input.to_string(),
                source: None,
            }),
        }
    }

    /// Split on the separator yielding the most parts; earlier separators
    /// win ties.
    fn split_range<'a>(&self, s: &'a str) -> Vec<&'a str> {
        let mut best = vec![s];
        for separator in &self.config.separators {
            let parts: Vec<&str> = s.split(separator.as_str()).collect();
            if parts.len() > best.len() {
                best = parts;
            }
        }
        best
    }

    /// One side of a range: the matching bound of a period phrase, or a
    /// single matched date.
    fn range_bound(
        &self,
        part: &str,
        phrases: &PhraseTable,
        bound: fn(Period) -> NaiveDateTime,
    ) -> Result<NaiveDateTime, ResolveError> {
        let normalized = self.normalizer.normalize(part);
        match phrases.lookup_period(&normalized) {
            Some(period) => Ok(bound(period)),
            None => self.matcher.resolve(&normalized, phrases),
        }
    }

    fn single(&self, dt: NaiveDateTime) -> Resolved {
        if self.config.always_return_period {
            Resolved::Period(Period::day_of(dt))
        } else {
            Resolved::Date(dt)
        }
    }
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DateParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateParser")
            .field("config", &self.config)
            .field("templates", &self.matcher.templates().len())
            .field("now", &self.phrases.now())
            .finish_non_exhaustive()
    }
}
