//! Mention extraction.
//!
//! A brand name is matched case-insensitively as a literal string. Regex
//! metacharacters in the name are escaped, so "C++", "Yahoo!" and
//! "Dr. Oetker" match themselves. A counted mention must not run into a
//! neighbouring word: an edge of the name that is a word character needs a
//! non-word character (or the text edge) next to it, so "Acme" is not found
//! inside "Acmeville". An edge that is punctuation, like the "+" of "C++",
//! has no such requirement.
//!
//! Every analysis fact locates the brand through [`BrandPattern`], so the
//! count, the rank and the context windows agree on case folding.

use std::ops::Range;

use regex::{Regex, RegexBuilder};
use tracing::warn;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Compiled matcher for one brand name.
#[derive(Debug, Clone)]
pub struct BrandPattern {
    literal: Regex,
    bounded_start: bool,
    bounded_end: bool,
}

impl BrandPattern {
    /// Returns `None` for a blank name.
    pub fn new(brand: &str) -> Option<Self> {
        let brand = brand.trim();
        let (first, last) = (brand.chars().next()?, brand.chars().next_back()?);

        match RegexBuilder::new(&regex::escape(brand))
            .case_insensitive(true)
            .build()
        {
            Ok(literal) => Some(Self {
                literal,
                bounded_start: is_word_char(first),
                bounded_end: is_word_char(last),
            }),
            Err(e) => {
                warn!(brand = %brand, error = %e, "Could not build mention pattern");
                None
            }
        }
    }

    /// Every case-insensitive occurrence, word boundaries ignored.
    pub fn occurrences<'t>(&'t self, text: &'t str) -> impl Iterator<Item = Range<usize>> + 't {
        self.literal.find_iter(text).map(|m| m.range())
    }

    /// Whether `text` contains the name anywhere, word boundaries ignored.
    pub fn is_match(&self, text: &str) -> bool {
        self.literal.is_match(text)
    }

    /// Span of the first occurrence, word boundaries ignored.
    pub fn first(&self, text: &str) -> Option<Range<usize>> {
        self.literal.find(text).map(|m| m.range())
    }

    fn is_standalone(&self, text: &str, span: &Range<usize>) -> bool {
        let before_ok = !self.bounded_start
            || !text[..span.start].chars().next_back().is_some_and(is_word_char);
        let after_ok =
            !self.bounded_end || !text[span.end..].chars().next().is_some_and(is_word_char);
        before_ok && after_ok
    }

    /// Number of occurrences that do not run into a neighbouring word.
    pub fn count(&self, text: &str) -> usize {
        self.occurrences(text)
            .filter(|span| self.is_standalone(text, span))
            .count()
    }
}

/// Count the occurrences of `brand` in `text`.
///
/// Multi-word names match only as a contiguous phrase. A blank brand name
/// never matches.
pub fn count_mentions(text: &str, brand: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    BrandPattern::new(brand).map_or(0, |pattern| pattern.count(text))
}

/// Byte span in `text` of the first case-insensitive occurrence of `brand`.
/// No word boundaries, so any counted mention implies a first occurrence.
pub fn first_occurrence(text: &str, brand: &str) -> Option<Range<usize>> {
    BrandPattern::new(brand)?.first(text)
}
