//! audiomap-cov (Coverage Review) - read-only catalog inspection and prompt
//! coverage review.
//!
//! Loads a recorded-clip catalog, resolves prompts against it, and renders
//! coverage reports so operators can see which wording still needs
//! recording. Never writes to the catalog.

pub mod cli;
pub mod report;

pub use cli::{Cli, Command};
