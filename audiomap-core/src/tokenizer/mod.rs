//! Prompt tokenization.
//!
//! Splits free-form prompt text into an ordered sequence of typed tokens:
//! literal wording, digits, and embedded dynamic variables. The pipeline, in
//! order: normalize, extract variables, phrase-aware segmentation, article
//! agreement, re-merge variables, classify. Variables are pulled out before
//! any word-boundary logic runs so their contents are never torn apart.

mod grammar;
mod phrases;

use crate::config::EngineConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use phrases::PhraseMatcher;

/// Classification of one tokenized unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Literal,
    Digit,
    Variable,
}

/// Why an article token was rewritten to "a" or "an".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammarContext {
    VowelFollowing,
    ConsonantFollowing,
    VariableFollowing,
}

/// One unit of a tokenized prompt. Produced fresh per tokenization call.
#[derive(Debug, Clone, Serialize)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    /// Order in the prompt, starting at 0
    pub position: usize,
    /// Extracted name, for `Variable` tokens
    pub variable_name: Option<String>,
    /// Set on article tokens rewritten by the grammar rule
    pub grammar_context: Option<GrammarContext>,
}

/// Spelled-out digit forms, index = value.
const DIGIT_WORDS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

static LINE_BREAK_MARKUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("static pattern"));
static DOUBLE_BRACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("static pattern"));
static PARENTHESIZED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]+)\)").expect("static pattern"));
static BRACKETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]").expect("static pattern"));
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__VAR_(\d+)__").expect("static pattern"));
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("static pattern"));

/// A dynamic variable pulled out of the text before segmentation.
#[derive(Debug, Clone)]
struct ExtractedVariable {
    /// Original surface text, e.g. `{{callout_type}}`
    surface: String,
    /// Extracted name, e.g. `callout_type`
    name: String,
}

/// Working unit between pipeline stages.
#[derive(Debug, Clone)]
struct Segment {
    text: String,
    variable: Option<ExtractedVariable>,
    grammar_context: Option<GrammarContext>,
}

impl Segment {
    fn literal(text: &str) -> Self {
        Self {
            text: text.to_string(),
            variable: None,
            grammar_context: None,
        }
    }

    fn variable(variable: &ExtractedVariable) -> Self {
        Self {
            text: variable.surface.clone(),
            variable: Some(variable.clone()),
            grammar_context: None,
        }
    }
}

/// Splits prompt text into typed tokens. Holds the phrase matcher compiled
/// from the configured phrase library; construction is the only non-trivial
/// cost, tokenization itself is allocation-light and has no I/O.
#[derive(Debug)]
pub struct Tokenizer {
    matcher: PhraseMatcher,
    vowel_exceptions: Vec<String>,
}

impl Tokenizer {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            matcher: PhraseMatcher::new(&config.phrases),
            vowel_exceptions: config
                .vowel_exceptions
                .iter()
                .map(|word| word.to_lowercase())
                .collect(),
        }
    }

    /// Tokenize a prompt. Returns an empty list only for empty or
    /// whitespace-only input.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let normalized = normalize_prompt(text);
        if normalized.is_empty() {
            return Vec::new();
        }

        let (stripped, variables) = extract_variables(&normalized);
        let mut segments = self.split_segments(&stripped);
        self.apply_article_rule(&mut segments);
        let merged = merge_variables(segments, &variables);

        let tokens: Vec<Token> = merged
            .into_iter()
            .enumerate()
            .map(|(position, segment)| classify(segment, position))
            .collect();
        debug!(text, count = tokens.len(), "tokenized prompt");
        tokens
    }

    /// Phrase-first segmentation: configured phrases claim their character
    /// ranges, every unclaimed range falls back to single words.
    fn split_segments(&self, text: &str) -> Vec<Segment> {
        let phrase_spans = self.matcher.find_spans(text);
        let mut positioned: Vec<(usize, Segment)> = phrase_spans
            .iter()
            .map(|&(start, end)| (start, Segment::literal(&text[start..end])))
            .collect();

        for word in WORD.find_iter(text) {
            let claimed = phrase_spans
                .iter()
                .any(|&(start, end)| word.start() < end && word.end() > start);
            if !claimed {
                positioned.push((word.start(), Segment::literal(word.as_str())));
            }
        }

        positioned.sort_by_key(|(start, _)| *start);
        positioned.into_iter().map(|(_, segment)| segment).collect()
    }

    /// Rewrite every standalone "a"/"an" from the token that follows it.
    fn apply_article_rule(&self, segments: &mut [Segment]) {
        for i in 0..segments.len() {
            if segments[i].text != "a" && segments[i].text != "an" {
                continue;
            }
            let (following, next_is_variable) = match segments.get(i + 1) {
                Some(next) => (
                    PLACEHOLDER.replace_all(&next.text, "").trim().to_string(),
                    PLACEHOLDER.is_match(&next.text),
                ),
                None => continue,
            };

            if let Some(first_word) = following.split_whitespace().next() {
                if grammar::starts_with_vowel_sound(first_word, &self.vowel_exceptions) {
                    segments[i].text = "an".to_string();
                    segments[i].grammar_context = Some(GrammarContext::VowelFollowing);
                } else {
                    segments[i].text = "a".to_string();
                    segments[i].grammar_context = Some(GrammarContext::ConsonantFollowing);
                }
            } else if next_is_variable {
                // no sound information for a caller-time substitution
                segments[i].text = "a".to_string();
                segments[i].grammar_context = Some(GrammarContext::VariableFollowing);
            }
        }
    }
}

/// Strip line-break markup, collapse whitespace, lowercase.
fn normalize_prompt(text: &str) -> String {
    let without_markup = LINE_BREAK_MARKUP.replace_all(text, " ");
    crate::text::normalize(&without_markup)
}

/// Replace every embedded dynamic reference with an internal placeholder,
/// recording surface text and name. Double-brace form first, then
/// parenthesized, then bracketed.
fn extract_variables(text: &str) -> (String, Vec<ExtractedVariable>) {
    let mut out = text.to_string();
    let mut variables = Vec::new();

    for pattern in [&*DOUBLE_BRACE, &*PARENTHESIZED, &*BRACKETED] {
        let matches: Vec<_> = pattern
            .captures_iter(&out)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let name = caps.get(1)?;
                // a later pattern must not re-capture an earlier placeholder
                if name.as_str().contains("__VAR_") {
                    return None;
                }
                Some((
                    whole.range(),
                    whole.as_str().to_string(),
                    name.as_str().to_string(),
                ))
            })
            .collect();
        // replace right to left so earlier ranges stay valid
        for (range, surface, name) in matches.into_iter().rev() {
            let placeholder = format!("__VAR_{}__", variables.len());
            variables.push(ExtractedVariable { surface, name });
            out.replace_range(range, &placeholder);
        }
    }
    (out, variables)
}

/// Splice recorded variables back in at their placeholder positions.
fn merge_variables(segments: Vec<Segment>, variables: &[ExtractedVariable]) -> Vec<Segment> {
    let mut merged = Vec::new();
    for segment in segments {
        if !PLACEHOLDER.is_match(&segment.text) {
            merged.push(segment);
            continue;
        }

        let text = segment.text;
        let mut cursor = 0;
        for caps in PLACEHOLDER.captures_iter(&text) {
            let (Some(whole), Some(index)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() > cursor {
                let before = text[cursor..whole.start()].trim();
                if !before.is_empty() {
                    merged.push(Segment::literal(before));
                }
            }
            if let Some(variable) = index
                .as_str()
                .parse::<usize>()
                .ok()
                .and_then(|i| variables.get(i))
            {
                merged.push(Segment::variable(variable));
            }
            cursor = whole.end();
        }
        if cursor < text.len() {
            let after = text[cursor..].trim();
            if !after.is_empty() {
                merged.push(Segment::literal(after));
            }
        }
    }
    merged
}

fn classify(segment: Segment, position: usize) -> Token {
    if let Some(variable) = segment.variable {
        return Token {
            text: variable.surface,
            kind: TokenKind::Variable,
            position,
            variable_name: Some(variable.name),
            grammar_context: None,
        };
    }
    let kind = if is_digit_token(&segment.text) {
        TokenKind::Digit
    } else {
        TokenKind::Literal
    };
    Token {
        text: segment.text,
        kind,
        position,
        variable_name: None,
        grammar_context: segment.grammar_context,
    }
}

/// A standalone numeral, or a spelled-out digit word.
fn is_digit_token(text: &str) -> bool {
    (!text.is_empty() && text.chars().all(|c| c.is_ascii_digit()))
        || DIGIT_WORDS.contains(&text)
}
