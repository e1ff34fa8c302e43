//! Error types for parser construction and date resolution.

use thiserror::Error;

/// A single template failed to match an input.
///
/// The matcher treats this as control flow and moves on to the next
/// template; it never reaches callers of [`crate::DateParser`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateParseError {
    /// The input does not have the shape of the template.
    #[error("'{input}' does not match template '{template}'")]
    NoMatch { input: String, template: String },

    /// The shape matched but the fields do not form a calendar date or time.
    #[error("'{input}' is not a valid date for template '{template}'")]
    InvalidDate { input: String, template: String },
}

/// Failure to resolve an expression into a date or period.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No phrase and no template matched a single expression.
    #[error("unsupported date string {input}")]
    UnparseableDate { input: String },

    /// A range expression split into the wrong number of parts, or one of
    /// its parts could not be resolved.
    #[error("cannot parse string: {transformed} (original: {original})")]
    UnparseableDateRange {
        transformed: String,
        original: String,
        #[source]
        source: Option<Box<ResolveError>>,
    },
}

/// Invalid [`crate::ParserConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The zone is neither `local`, `utc`, nor an IANA identifier.
    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),

    /// A template skeleton uses an unknown placeholder or is malformed.
    #[error("invalid template skeleton '{skeleton}': {message}")]
    InvalidSkeleton { skeleton: String, message: String },

    /// No skeletons were configured.
    #[error("at least one template skeleton is required")]
    NoSkeletons,

    /// A range separator was empty.
    #[error("range separators must not be empty")]
    EmptySeparator,
}
