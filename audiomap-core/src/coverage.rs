//! Batch coverage reporting over many prompts.
//!
//! Aggregates per-prompt resolution into success-rate statistics and a
//! deduplicated list of wording that still needs recording, for operator
//! review.

use crate::resolver::{ResolutionResult, Resolver};
use serde::Serialize;
use std::collections::HashSet;
use tracing::info;

/// Aggregate resolution statistics for a batch of prompts.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    pub total_prompts: usize,
    /// Prompts with success rate exactly 1.0
    pub fully_mapped: usize,
    /// Prompts with success rate strictly between 0 and 1
    pub partially_mapped: usize,
    /// Prompts with success rate exactly 0.0
    pub unmapped: usize,
    /// Mean of per-prompt success rates
    pub overall_success_rate: f64,
    /// Missing wording across all prompts, deduplicated, first occurrence
    /// first
    pub unique_missing_segments: Vec<String>,
    /// Per-prompt results, in input order
    pub results: Vec<ResolutionResult>,
}

impl Resolver {
    /// Resolve a batch and aggregate how well the catalog covers it.
    pub fn coverage<I, S>(
        &self,
        prompts: I,
        company: Option<&str>,
        schema: Option<&str>,
    ) -> CoverageReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let results = self.batch_resolve(prompts, company, schema);

        let total_prompts = results.len();
        let fully_mapped = results.iter().filter(|r| r.success_rate == 1.0).count();
        let unmapped = results.iter().filter(|r| r.success_rate == 0.0).count();
        let partially_mapped = total_prompts - fully_mapped - unmapped;
        let overall_success_rate = if total_prompts == 0 {
            0.0
        } else {
            results.iter().map(|r| r.success_rate).sum::<f64>() / total_prompts as f64
        };

        let mut seen = HashSet::new();
        let mut unique_missing_segments = Vec::new();
        for result in &results {
            for segment in &result.missing_segments {
                if seen.insert(segment.clone()) {
                    unique_missing_segments.push(segment.clone());
                }
            }
        }

        info!(
            total = total_prompts,
            fully_mapped,
            unmapped,
            missing = unique_missing_segments.len(),
            "coverage computed"
        );
        CoverageReport {
            total_prompts,
            fully_mapped,
            partially_mapped,
            unmapped,
            overall_success_rate,
            unique_missing_segments,
            results,
        }
    }
}
