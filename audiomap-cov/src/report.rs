//! Human-readable rendering of resolution results, coverage reports, and
//! catalog diagnostics.

use audiomap_core::catalog::{CatalogRecord, CatalogStats, IntegrityReport};
use audiomap_core::{CoverageReport, ResolutionResult};
use chrono::{DateTime, Local};

/// Render one resolution outcome for operator review.
pub fn resolution_report(result: &ResolutionResult) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Text: '{}'", result.original_text));
    lines.push(format!("Method: {}", result.method));
    lines.push(format!("Success rate: {:.1}%", result.success_rate * 100.0));

    if !result.play_ids.is_empty() {
        lines.push("Audio prompts:".to_string());
        for (i, (id, log)) in result.play_ids.iter().zip(&result.play_log).enumerate() {
            lines.push(format!("  {}. {} // {}", i + 1, id, log));
        }
    }
    if !result.missing_segments.is_empty() {
        lines.push("Missing segments:".to_string());
        for segment in &result.missing_segments {
            lines.push(format!("  - '{}' (needs recording)", segment));
        }
    }
    lines.join("\n")
}

/// Render a batch coverage report. Per-prompt details are listed only for
/// prompts that are not fully mapped.
pub fn coverage_report(report: &CoverageReport, generated_at: DateTime<Local>) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Coverage report ({})",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    lines.push(format!("  Prompts:          {}", report.total_prompts));
    lines.push(format!("  Fully mapped:     {}", report.fully_mapped));
    lines.push(format!("  Partially mapped: {}", report.partially_mapped));
    lines.push(format!("  Unmapped:         {}", report.unmapped));
    lines.push(format!(
        "  Overall success:  {:.1}%",
        report.overall_success_rate * 100.0
    ));

    if !report.unique_missing_segments.is_empty() {
        lines.push("Needs recording:".to_string());
        for segment in &report.unique_missing_segments {
            lines.push(format!("  - '{}'", segment));
        }
    }

    for result in report.results.iter().filter(|r| r.success_rate < 1.0) {
        lines.push(String::new());
        lines.push(resolution_report(result));
    }
    lines.join("\n")
}

/// Render catalog size statistics.
pub fn stats_report(stats: &CatalogStats) -> String {
    [
        format!("Records:            {}", stats.records),
        format!("Unique transcripts: {}", stats.unique_transcripts),
        format!("Companies:          {}", stats.companies),
        format!("Folders:            {}", stats.folders),
    ]
    .join("\n")
}

/// Render the integrity report.
pub fn validate_report(report: &IntegrityReport) -> String {
    if report.is_clean() {
        return "Catalog integrity: clean".to_string();
    }
    let mut lines = vec!["Catalog integrity warnings:".to_string()];
    if !report.duplicate_paths.is_empty() {
        lines.push(format!(
            "  Paths recorded by more than one company: {}",
            report.duplicate_paths.join(", ")
        ));
    }
    if report.empty_transcripts > 0 {
        lines.push(format!(
            "  Records with empty transcripts: {}",
            report.empty_transcripts
        ));
    }
    if !report.missing_folders.is_empty() {
        lines.push(format!(
            "  Expected folders absent: {}",
            report.missing_folders.join(", ")
        ));
    }
    lines.join("\n")
}

/// Render search hits, one record per line.
pub fn search_report(records: &[&CatalogRecord]) -> String {
    if records.is_empty() {
        return "No matching records".to_string();
    }
    records
        .iter()
        .map(|record| {
            format!(
                "{:<20} {:<10} '{}'",
                record.path(),
                record.company,
                record.transcript
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use audiomap_core::catalog::CatalogIndex;
    use audiomap_core::{EngineConfig, Resolver};
    use chrono::TimeZone;

    fn resolver() -> Resolver {
        let csv = "Company,Folder,File Name,Transcript\naep,type,1001.ulaw,electric\n";
        let index = CatalogIndex::from_csv_reader(csv.as_bytes()).expect("catalog loads");
        Resolver::new(index, EngineConfig::default())
    }

    #[test]
    fn resolution_report_lists_prompts_and_missing() {
        let result = resolver().resolve("electric", Some("aep"), None);
        let rendered = resolution_report(&result);
        assert!(rendered.contains("Method: exact"));
        assert!(rendered.contains("1. type:1001 // electric"));
        assert!(!rendered.contains("Missing segments"));

        let result = resolver().resolve("xyz", Some("aep"), None);
        let rendered = resolution_report(&result);
        assert!(rendered.contains("Success rate: 0.0%"));
        assert!(rendered.contains("'xyz' (needs recording)"));
    }

    #[test]
    fn coverage_report_carries_counts_and_timestamp() {
        let report = resolver().coverage(["electric", "xyz"], Some("aep"), None);
        let generated_at = Local.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let rendered = coverage_report(&report, generated_at);
        assert!(rendered.contains("Coverage report (2026-08-06 12:00:00)"));
        assert!(rendered.contains("Fully mapped:     1"));
        assert!(rendered.contains("Unmapped:         1"));
        assert!(rendered.contains("- 'xyz'"));
    }

    #[test]
    fn validate_report_flags_missing_folders() {
        let resolver = resolver();
        let rendered = validate_report(&resolver.index().validate());
        // single-folder catalog is missing conventional folders
        assert!(rendered.contains("Expected folders absent"));
    }

    #[test]
    fn search_report_handles_no_hits() {
        assert_eq!(search_report(&[]), "No matching records");
    }
}
