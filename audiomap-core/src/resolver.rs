//! Layered prompt resolution against the catalog index.
//!
//! Strategies are attempted in order, first success wins: empty guard,
//! whole-phrase exact match, per-token mapping, combination retry over
//! contiguous runs of literal tokens. Every public operation returns a total
//! `ResolutionResult`; "not found" lives inside the structure as missing
//! segments, never as an error.

use crate::catalog::CatalogIndex;
use crate::config::EngineConfig;
use crate::text;
use crate::tokenizer::{Token, TokenKind, Tokenizer};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Strategy that produced a `ResolutionResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResolutionMethod {
    /// Blank input
    #[serde(rename = "empty")]
    Empty,
    /// Whole prompt matched one recording
    #[serde(rename = "exact")]
    Exact,
    /// Token-by-token mapping
    #[serde(rename = "segment")]
    Segment,
    /// Token mapping improved by re-grouping literal runs
    #[serde(rename = "segment+combination")]
    SegmentCombination,
    /// Tokenization produced nothing to map
    #[serde(rename = "parse-failed")]
    ParseFailed,
}

impl fmt::Display for ResolutionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Exact => "exact",
            Self::Segment => "segment",
            Self::SegmentCombination => "segment+combination",
            Self::ParseFailed => "parse-failed",
        };
        f.write_str(name)
    }
}

/// Outcome of resolving one prompt.
///
/// `play_ids` and `play_log` always have equal length; `success_rate` is the
/// fraction of tokens resolved, by count, in [0, 1]. Immutable once
/// returned.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionResult {
    pub original_text: String,
    /// Ordered playable ids: `folder:id`, `folder:{{variable}}`,
    /// `dynamic:{{name}}`, or `digits:<n>`
    pub play_ids: Vec<String>,
    /// Human-readable description per play id
    pub play_log: Vec<String>,
    /// Literal wording with no recording; operator remediation list, never
    /// playable
    pub missing_segments: Vec<String>,
    pub success_rate: f64,
    pub method: ResolutionMethod,
}

impl ResolutionResult {
    fn empty(text: &str, method: ResolutionMethod) -> Self {
        Self {
            original_text: text.to_string(),
            play_ids: Vec::new(),
            play_log: Vec::new(),
            missing_segments: Vec::new(),
            success_rate: 0.0,
            method,
        }
    }
}

/// Maps prompt text to ordered catalog paths. Pure after construction: no
/// I/O, no shared mutable state, safe for concurrent use.
pub struct Resolver {
    index: CatalogIndex,
    config: EngineConfig,
    tokenizer: Tokenizer,
}

impl Resolver {
    pub fn new(index: CatalogIndex, config: EngineConfig) -> Self {
        let tokenizer = Tokenizer::new(&config);
        Self {
            index,
            config,
            tokenizer,
        }
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Resolve one prompt to an ordered list of playable ids.
    ///
    /// `schema` is accepted for callers that carry a schema context; matching
    /// searches the company tier, then the global tier.
    pub fn resolve(
        &self,
        prompt: &str,
        company: Option<&str>,
        schema: Option<&str>,
    ) -> ResolutionResult {
        let _ = schema;
        debug!(prompt, ?company, "resolving prompt");

        if prompt.trim().is_empty() {
            return ResolutionResult::empty(prompt, ResolutionMethod::Empty);
        }

        if let Some(record) = self.index.lookup(prompt, company, None) {
            debug!(prompt, path = %record.path(), "whole-phrase exact match");
            return ResolutionResult {
                original_text: prompt.to_string(),
                play_ids: vec![record.path()],
                play_log: vec![prompt.to_string()],
                missing_segments: Vec::new(),
                success_rate: 1.0,
                method: ResolutionMethod::Exact,
            };
        }

        let tokens = self.tokenizer.tokenize(prompt);
        if tokens.is_empty() {
            let mut result = ResolutionResult::empty(prompt, ResolutionMethod::ParseFailed);
            result.missing_segments.push(prompt.to_string());
            return result;
        }

        let per_token = self.resolve_tokens(prompt, &tokens, company);
        if per_token.missing_segments.is_empty() {
            return per_token;
        }
        if per_token.missing_segments.len() == tokens.len() {
            // nothing resolved: surface the whole prompt as the wording that
            // needs recording, not each word separately
            let mut result = ResolutionResult::empty(prompt, ResolutionMethod::Segment);
            result.missing_segments.push(prompt.to_string());
            return result;
        }

        match self.best_combination(prompt, &tokens, company, per_token.success_rate) {
            Some(better) => better,
            None => per_token,
        }
    }

    /// Resolve each prompt independently, in order.
    pub fn batch_resolve<I, S>(
        &self,
        prompts: I,
        company: Option<&str>,
        schema: Option<&str>,
    ) -> Vec<ResolutionResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        prompts
            .into_iter()
            .map(|prompt| self.resolve(prompt.as_ref(), company, schema))
            .collect()
    }

    fn resolve_tokens(
        &self,
        prompt: &str,
        tokens: &[Token],
        company: Option<&str>,
    ) -> ResolutionResult {
        let mut play_ids = Vec::new();
        let mut play_log = Vec::new();
        let mut missing = Vec::new();

        for token in tokens {
            match self.resolve_token(token, company) {
                Some((path, description)) => {
                    play_ids.push(path);
                    play_log.push(description);
                }
                None => missing.push(token.text.clone()),
            }
        }

        let resolved = tokens.len() - missing.len();
        ResolutionResult {
            original_text: prompt.to_string(),
            play_ids,
            play_log,
            missing_segments: missing,
            success_rate: resolved as f64 / tokens.len() as f64,
            method: ResolutionMethod::Segment,
        }
    }

    fn resolve_token(&self, token: &Token, company: Option<&str>) -> Option<(String, String)> {
        match token.kind {
            TokenKind::Variable => Some(self.resolve_variable(token)),
            TokenKind::Digit => self.resolve_digit(token),
            TokenKind::Literal => self.resolve_literal(token, company),
        }
    }

    /// A variable always resolves: it stands for a caller-time substitution,
    /// not missing audio. Unconfigured names get a generic dynamic path.
    fn resolve_variable(&self, token: &Token) -> (String, String) {
        let raw = token.variable_name.clone().unwrap_or_else(|| {
            token
                .text
                .trim_matches(&['{', '}', '(', ')', '[', ']'][..])
                .to_string()
        });
        let name = raw.to_lowercase().replace(' ', "_");
        let description = format!("[{}]", raw);

        match self.config.variables.get(&name) {
            Some(path) => {
                debug!(variable = %name, path = %path, "mapped variable");
                (path.clone(), description)
            }
            None => {
                let path = format!("dynamic:{{{{{}}}}}", name);
                warn!(variable = %name, "unknown variable, using dynamic fallback");
                (path, description)
            }
        }
    }

    fn resolve_digit(&self, token: &Token) -> Option<(String, String)> {
        self.config
            .digits
            .get(&token.text.to_lowercase())
            .map(|path| (path.clone(), token.text.clone()))
    }

    fn resolve_literal(&self, token: &Token, company: Option<&str>) -> Option<(String, String)> {
        if let Some(record) = self.index.lookup(&token.text, company, None) {
            return Some((record.path(), token.text.clone()));
        }
        for variant in text_variants(&token.text) {
            if let Some(record) = self.index.lookup(&variant, company, None) {
                debug!(text = %token.text, variant = %variant, path = %record.path(), "matched via variant");
                return Some((record.path(), token.text.clone()));
            }
        }
        None
    }

    /// Re-group consecutive literal tokens and retry whole-phrase matches on
    /// each contiguous sub-run, full run first, then shrinking windows.
    /// Returns the best candidate only when it strictly beats `baseline`.
    fn best_combination(
        &self,
        prompt: &str,
        tokens: &[Token],
        company: Option<&str>,
        baseline: f64,
    ) -> Option<ResolutionResult> {
        let mut best: Option<ResolutionResult> = None;
        let mut best_rate = baseline;

        for (run_start, run_len) in literal_runs(tokens) {
            if run_len < 2 {
                continue;
            }
            // singletons were already tried during per-token mapping
            for window in (2..=run_len).rev() {
                for offset in 0..=(run_len - window) {
                    let start = run_start + offset;
                    let combined = tokens[start..start + window]
                        .iter()
                        .map(|token| token.text.as_str())
                        .collect::<Vec<_>>()
                        .join(" ");
                    let Some(record) = self.index.lookup(&combined, company, None) else {
                        continue;
                    };
                    let candidate = self.resolve_with_group(
                        prompt,
                        tokens,
                        company,
                        start,
                        window,
                        &record.path(),
                        &combined,
                    );
                    if candidate.success_rate > best_rate {
                        debug!(
                            combined = %combined,
                            rate = candidate.success_rate,
                            "combination improved result"
                        );
                        best_rate = candidate.success_rate;
                        best = Some(candidate);
                    }
                }
            }
        }
        best
    }

    /// Per-token mapping with `tokens[start..start+len]` replaced by one
    /// already-matched recording.
    #[allow(clippy::too_many_arguments)]
    fn resolve_with_group(
        &self,
        prompt: &str,
        tokens: &[Token],
        company: Option<&str>,
        start: usize,
        len: usize,
        group_path: &str,
        group_text: &str,
    ) -> ResolutionResult {
        let mut play_ids = Vec::new();
        let mut play_log = Vec::new();
        let mut missing = Vec::new();
        let mut resolved = 0usize;

        let mut i = 0;
        while i < tokens.len() {
            if i == start {
                play_ids.push(group_path.to_string());
                play_log.push(group_text.to_string());
                resolved += len;
                i += len;
                continue;
            }
            match self.resolve_token(&tokens[i], company) {
                Some((path, description)) => {
                    play_ids.push(path);
                    play_log.push(description);
                    resolved += 1;
                }
                None => missing.push(tokens[i].text.clone()),
            }
            i += 1;
        }

        ResolutionResult {
            original_text: prompt.to_string(),
            play_ids,
            play_log,
            missing_segments: missing,
            success_rate: resolved as f64 / tokens.len() as f64,
            method: ResolutionMethod::SegmentCombination,
        }
    }
}

/// Maximal runs of consecutive `Literal` tokens as (start, length).
fn literal_runs(tokens: &[Token]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut run_start: Option<usize> = None;
    for (i, token) in tokens.iter().enumerate() {
        match (token.kind, run_start) {
            (TokenKind::Literal, None) => run_start = Some(i),
            (TokenKind::Literal, Some(_)) => {}
            (_, Some(start)) => {
                runs.push((start, i - start));
                run_start = None;
            }
            (_, None) => {}
        }
    }
    if let Some(start) = run_start {
        runs.push((start, tokens.len() - start));
    }
    runs
}

/// Spelling variants tried when a literal token has no direct match:
/// punctuation stripped, trailing punctuation added, leading article
/// swapped.
fn text_variants(token_text: &str) -> Vec<String> {
    let mut variants = Vec::new();

    let stripped = text::strip_punctuation(token_text);
    if stripped != token_text {
        variants.push(stripped);
    }
    for mark in [".", "!", "?", ","] {
        variants.push(format!("{}{}", token_text, mark));
    }
    if let Some(rest) = token_text.strip_prefix("a ") {
        variants.push(format!("an {}", rest));
    } else if let Some(rest) = token_text.strip_prefix("an ") {
        variants.push(format!("a {}", rest));
    }
    variants
}
