//! First-match search over phrases and templates.

use chrono::{Datelike, NaiveDateTime};

use crate::calendar;
use crate::config::ParserConfig;
use crate::error::{ConfigError, ResolveError, TemplateParseError};
use crate::normalize::title_case;
use crate::phrases::PhraseTable;
use crate::template::{self, Template};

/// Resolves one normalized expression to a single date-time.
#[derive(Debug, Clone)]
pub struct Matcher {
    templates: Vec<Template>,
    strict: bool,
}

impl Matcher {
    /// `templates` must already be in priority order.
    #[must_use]
    pub fn new(templates: Vec<Template>, strict: bool) -> Self {
        Self { templates, strict }
    }

    /// Generate templates from the configured skeletons.
    pub fn from_config(config: &ParserConfig) -> Result<Self, ConfigError> {
        let templates = template::generate(config.skeletons.as_slice(), config.date_order)?;
        Ok(Self::new(templates, config.strict))
    }

    #[must_use]
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Phrase lookup first, then templates in priority order.
    pub fn resolve(
        &self,
        normalized: &str,
        phrases: &PhraseTable,
    ) -> Result<NaiveDateTime, ResolveError> {
        if let Some(dt) = phrases.lookup_date(normalized) {
            tracing::debug!(input = normalized, "Matched phrase");
            return Ok(dt);
        }

        let titled = title_case(normalized);
        let input_len = titled.chars().count();
        let default_year = phrases.now().year();

        for template in &self.templates {
            if self.strict && template.strict_len() != input_len {
                continue;
            }
            match self.try_template(template, &titled, default_year) {
                Ok(dt) => {
                    tracing::debug!(input = %titled, template = %template, "Matched template");
                    return Ok(self.correct_short_year(dt, normalized));
                }
                Err(e) => tracing::trace!(error = %e, "Template rejected"),
            }
        }

        tracing::debug!(input = normalized, "No phrase or template matched");
        Err(ResolveError::UnparseableDate {
            input: normalized.to_string(),
        })
    }

    fn try_template(
        &self,
        template: &Template,
        input: &str,
        default_year: i32,
    ) -> Result<NaiveDateTime, TemplateParseError> {
        template
            .parse(input)?
            .to_datetime(default_year)
            .ok_or_else(|| TemplateParseError::InvalidDate {
                input: input.to_string(),
                template: template.render().to_string(),
            })
    }

    /// Lenient mode lets `YYYY` swallow a two-digit year; read it as 20xx
    /// unless the input really spelled out a four-digit year.
    fn correct_short_year(&self, dt: NaiveDateTime, normalized: &str) -> NaiveDateTime {
        if self.strict || dt.year() >= 100 || has_four_digit_token(normalized) {
            return dt;
        }
        calendar::add_years(dt, 2000)
    }
}

fn has_four_digit_token(s: &str) -> bool {
    s.split(' ')
        .any(|token| token.len() == 4 && token.chars().all(|c| c.is_ascii_digit()))
}
