//! Text normalization pipeline.
//!
//! Rewrites raw input into the canonical token sequence the phrase table and
//! templates expect. The stages run in a fixed order and each one feeds the
//! next:
//!
//! 1. lowercase and trim
//! 2. separator characters (`-`, `/`, `.`, `,`) become spaces
//! 3. word substitution (`friday` → `fri`, `last` → `previous`, ...)
//! 4. noise filtering: alphabetic tokens not on the allow-list are dropped
//! 5. ordinal suffixes are stripped (`1st` → `1`) and whitespace collapsed
//!
//! Substitution is plain substring replacement, so a key inside a longer
//! word is replaced too (`lastly` → `previously`).

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

/// Characters that separate date components, unified to a space.
pub const SEPARATOR_CHARS: [char; 4] = ['-', '/', '.', ','];

fn ordinal_suffix() -> &'static Regex {
    static ORDINAL: OnceLock<Regex> = OnceLock::new();
    ORDINAL.get_or_init(|| Regex::new(r"(\d)(?:st|nd|rd|th)").unwrap())
}

/// The configured normalization tables.
#[derive(Debug, Clone)]
pub struct Normalizer {
    replaced_words: Vec<(String, String)>,
    unfiltered_words: HashSet<String>,
}

impl Normalizer {
    #[must_use]
    pub fn new(replaced_words: Vec<(String, String)>, unfiltered_words: &[String]) -> Self {
        Self {
            replaced_words: replaced_words
                .into_iter()
                .filter(|(from, _)| !from.is_empty())
                .collect(),
            unfiltered_words: unfiltered_words.iter().cloned().collect(),
        }
    }

    /// Run the full pipeline.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let folded = fold_case(raw);
        let spaced = unify_separators(&folded);
        let substituted = self.replace_words(&spaced);
        let filtered = self.filter_noise(&substituted);
        strip_ordinals(&filtered)
    }

    /// Lowercase, trim, and apply word substitution only.
    ///
    /// This is the form used for whole-input period lookups and range
    /// splitting, where separators must survive.
    #[must_use]
    pub fn substitute(&self, raw: &str) -> String {
        self.replace_words(&fold_case(raw))
    }

    fn replace_words(&self, s: &str) -> String {
        self.replaced_words
            .iter()
            .fold(s.to_string(), |acc, (from, to)| acc.replace(from.as_str(), to))
    }

    fn filter_noise(&self, s: &str) -> String {
        s.split(' ')
            .filter(|token| self.unfiltered_words.contains(*token) || !is_alphabetic(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn fold_case(s: &str) -> String {
    s.to_lowercase().trim().to_string()
}

fn unify_separators(s: &str) -> String {
    s.replace(SEPARATOR_CHARS, " ")
}

/// Non-empty and made only of letters.
fn is_alphabetic(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

fn strip_ordinals(s: &str) -> String {
    ordinal_suffix()
        .replace_all(s, "$1")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first letter of every run of letters, lowercase the rest.
#[must_use]
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}
