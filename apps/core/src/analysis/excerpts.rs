//! Sentence excerpts mentioning a brand.

use super::mentions::BrandPattern;

/// Maximum number of excerpts kept per analysis.
pub const MAX_EXCERPTS: usize = 3;

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Split `text` on `.`, `!` and `?` and return the first [`MAX_EXCERPTS`]
/// trimmed sentences that contain `brand` (case-insensitive), in order.
///
/// A terminator inside an occurrence of the brand itself ("Dr. Oetker",
/// "Yahoo!") does not end a sentence.
pub fn extract_excerpts(text: &str, brand: &str) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }
    let Some(matcher) = BrandPattern::new(brand) else {
        return vec![];
    };

    split_sentences(text, &matcher)
        .into_iter()
        .filter(|sentence| matcher.is_match(sentence))
        .map(|sentence| sentence.trim().to_string())
        .filter(|sentence| !sentence.is_empty())
        .take(MAX_EXCERPTS)
        .collect()
}

/// Matcher spans are sorted and disjoint; the span cursor only moves forward.
fn split_sentences<'a>(text: &'a str, protected: &BrandPattern) -> Vec<&'a str> {
    let mut spans = protected.occurrences(text).peekable();

    let mut sentences = Vec::new();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if !is_terminator(c) {
            continue;
        }
        while spans.next_if(|span| span.end <= i).is_some() {}
        let inside_span = spans.peek().is_some_and(|span| span.start <= i);
        if !inside_span {
            sentences.push(&text[start..i]);
            start = i + c.len_utf8();
        }
    }
    sentences.push(&text[start..]);
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_matching_sentences_in_order() {
        let text = "Acme is great. Globex is fine! Is acme cheap? Nobody knows.";
        assert_eq!(
            extract_excerpts(text, "Acme"),
            vec!["Acme is great".to_string(), "Is acme cheap".to_string()]
        );
    }

    #[test]
    fn test_caps_at_three() {
        let text = "Acme one. Acme two. Acme three. Acme four.";
        let excerpts = extract_excerpts(text, "Acme");
        assert_eq!(excerpts.len(), MAX_EXCERPTS);
        assert_eq!(excerpts[2], "Acme three");
    }

    #[test]
    fn test_brand_with_terminator_stays_whole() {
        let text = "Try Dr. Oetker pizza. It is fine.";
        assert_eq!(extract_excerpts(text, "Dr. Oetker"), vec!["Try Dr. Oetker pizza"]);
    }

    #[test]
    fn test_exclamation_in_brand_stays_whole() {
        let text = "Yahoo! is popular. Many still use Yahoo! daily. Bing exists.";
        assert_eq!(
            extract_excerpts(text, "Yahoo!"),
            vec!["Yahoo! is popular", "Many still use Yahoo! daily"]
        );
    }

    #[test]
    fn test_terminators_between_many_spans() {
        let text = "Dr. Oetker. Dr. Oetker! x. Dr. Oetker? y. Dr. Oetker.";
        assert_eq!(
            split_sentences(text, &BrandPattern::new("Dr. Oetker").unwrap()),
            vec!["Dr. Oetker", " Dr. Oetker", " x", " Dr. Oetker", " y", " Dr. Oetker", ""]
        );
    }

    #[test]
    fn test_no_match() {
        assert!(extract_excerpts("Globex only.", "Acme").is_empty());
        assert!(extract_excerpts("", "Acme").is_empty());
    }
}
