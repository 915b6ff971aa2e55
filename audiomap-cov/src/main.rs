//! audiomap-cov (Coverage Review) - read-only catalog inspection tool
//!
//! Loads the recorded-clip catalog, resolves prompts against it and renders
//! coverage reports, statistics, integrity findings and transcript searches.

use anyhow::{Context, Result};
use audiomap_cov::{report, Cli, Command};
use audiomap_core::{CatalogIndex, EngineConfig, Resolver};
use clap::Parser;
use serde::Serialize;
use std::path::Path;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting audiomap coverage review (audiomap-cov) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let cli = Cli::parse();

    let index = CatalogIndex::load_csv(&cli.catalog)
        .with_context(|| format!("loading catalog {}", cli.catalog.display()))?;
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading engine config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let company = cli.company.as_deref();
    let schema = cli.schema.as_deref();

    match cli.command {
        Command::Stats => {
            let stats = index.stats();
            emit(cli.json, &stats, report::stats_report(&stats))?;
        }
        Command::Validate => {
            let integrity = index.validate();
            emit(cli.json, &integrity, report::validate_report(&integrity))?;
        }
        Command::Search {
            fragment,
            prefix,
            folder,
        } => {
            let hits = if prefix {
                index.prefix_search(&fragment, company, folder.as_deref())
            } else {
                index.substring_search(&fragment, company, folder.as_deref())
            };
            emit(cli.json, &hits, report::search_report(&hits))?;
        }
        Command::Resolve { text } => {
            let resolver = Resolver::new(index, config);
            for prompt in &text {
                let result = resolver.resolve(prompt, company, schema);
                emit(cli.json, &result, report::resolution_report(&result))?;
            }
        }
        Command::Coverage { prompts } => {
            let lines = read_prompts(&prompts)?;
            info!("resolving {} prompts from {}", lines.len(), prompts.display());
            let resolver = Resolver::new(index, config);
            let coverage = resolver.coverage(&lines, company, schema);
            emit(
                cli.json,
                &coverage,
                report::coverage_report(&coverage, chrono::Local::now()),
            )?;
        }
    }

    Ok(())
}

/// One prompt per non-empty line.
fn read_prompts(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading prompts {}", path.display()))?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn emit<T: Serialize>(json: bool, value: &T, human: String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", human);
    }
    Ok(())
}
