//! Multi-word phrase detection for segmentation.

use crate::text::normalize;
use regex::Regex;
use tracing::warn;

/// Matches the configured phrase library in a single pass over the text.
///
/// Compiled once at tokenizer construction as one alternation of escaped
/// literals, longest first, so "this is an" wins over "this is a" where both
/// start at the same offset. Matches are non-overlapping and bounded by word
/// boundaries.
#[derive(Debug)]
pub(super) struct PhraseMatcher {
    pattern: Option<Regex>,
}

impl PhraseMatcher {
    pub(super) fn new(phrases: &[String]) -> Self {
        let mut normalized: Vec<String> = phrases
            .iter()
            .map(|phrase| normalize(phrase))
            .filter(|phrase| !phrase.is_empty())
            .collect();
        normalized.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        normalized.dedup();

        if normalized.is_empty() {
            return Self { pattern: None };
        }

        let alternation = normalized
            .iter()
            .map(|phrase| regex::escape(phrase))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = match Regex::new(&format!(r"\b(?:{})\b", alternation)) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!("phrase library disabled, pattern failed to compile: {}", e);
                None
            }
        };
        Self { pattern }
    }

    /// Non-overlapping phrase spans in `text`, in position order.
    pub(super) fn find_spans(&self, text: &str) -> Vec<(usize, usize)> {
        match &self.pattern {
            Some(pattern) => pattern
                .find_iter(text)
                .map(|m| (m.start(), m.end()))
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(phrases: &[&str]) -> PhraseMatcher {
        let phrases: Vec<String> = phrases.iter().map(|p| p.to_string()).collect();
        PhraseMatcher::new(&phrases)
    }

    #[test]
    fn finds_phrases_in_position_order() {
        let m = matcher(&["thank you", "press any key"]);
        let text = "press any key and thank you";
        let spans = m.find_spans(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(&text[spans[0].0..spans[0].1], "press any key");
        assert_eq!(&text[spans[1].0..spans[1].1], "thank you");
    }

    #[test]
    fn longer_phrase_wins_at_same_start() {
        let m = matcher(&["this is a", "this is an"]);
        let text = "this is an electric";
        let spans = m.find_spans(text);
        assert_eq!(&text[spans[0].0..spans[0].1], "this is an");
    }

    #[test]
    fn respects_word_boundaries() {
        let m = matcher(&["not home"]);
        assert!(m.find_spans("she is not home now").len() == 1);
        assert!(m.find_spans("cannot homer").is_empty());
    }

    #[test]
    fn empty_library_matches_nothing() {
        let m = matcher(&[]);
        assert!(m.find_spans("anything at all").is_empty());
    }
}
