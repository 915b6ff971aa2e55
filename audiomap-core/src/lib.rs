//! # audiomap core library
//!
//! Resolves free-form IVR prompt text into the ordered sequence of
//! pre-recorded audio clips that reproduces it over a phone line, and flags
//! wording with no corresponding recording:
//! - Catalog index over recorded-clip metadata (CSV ingestion, tiered
//!   lookup, integrity reporting)
//! - Segment tokenizer (phrase library, digits, dynamic variables, article
//!   grammar)
//! - Layered resolution engine (exact match, per-token mapping, combination
//!   retry)
//! - Batch coverage reporting

pub mod catalog;
pub mod config;
pub mod coverage;
pub mod error;
pub mod resolver;
pub mod text;
pub mod tokenizer;

pub use catalog::{CatalogIndex, CatalogRecord, CatalogStats, IntegrityReport};
pub use config::EngineConfig;
pub use coverage::CoverageReport;
pub use error::{Error, Result};
pub use resolver::{ResolutionMethod, ResolutionResult, Resolver};
