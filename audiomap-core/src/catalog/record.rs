//! Catalog record construction and validation.

use serde::Serialize;
use thiserror::Error;

/// Reasons a catalog row is rejected during load. Per-row failures are
/// logged and skipped; they never abort a load.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// A required field is empty after trimming
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Transcript is empty or a spreadsheet placeholder ("nan", "none")
    #[error("empty or placeholder transcript")]
    EmptyTranscript,

    /// File name carries no digit run to derive the clip id from
    #[error("no numeric id in file name: {0}")]
    NoNumericId(String),
}

/// One recorded clip: tenant tag, semantic folder, source file name, the
/// numeric id parsed out of it, and the text the clip speaks.
///
/// Only constructed through [`CatalogRecord::from_fields`]; immutable after
/// load.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogRecord {
    /// Lowercased tenant tag
    pub company: String,
    /// Semantic category, the first half of the playable path
    pub folder: String,
    /// Raw source identifier, e.g. "1001.ulaw"
    pub file_name: String,
    /// First maximal digit run of `file_name`, kept as text
    pub id: String,
    /// Human text the clip speaks
    pub transcript: String,
}

impl CatalogRecord {
    /// Validating factory for one catalog row. All fields are trimmed,
    /// `company` is lowercased and `id` is extracted from `file_name`.
    pub fn from_fields(
        company: &str,
        folder: &str,
        file_name: &str,
        transcript: &str,
    ) -> Result<Self, RecordError> {
        let company = company.trim().to_lowercase();
        let folder = folder.trim().to_string();
        let file_name = file_name.trim().to_string();
        let transcript = transcript.trim().to_string();

        if company.is_empty() {
            return Err(RecordError::MissingField("Company"));
        }
        if folder.is_empty() {
            return Err(RecordError::MissingField("Folder"));
        }
        if file_name.is_empty() {
            return Err(RecordError::MissingField("File Name"));
        }
        if transcript.is_empty() || matches!(transcript.to_lowercase().as_str(), "nan" | "none") {
            return Err(RecordError::EmptyTranscript);
        }

        let id = first_digit_run(&file_name)
            .ok_or_else(|| RecordError::NoNumericId(file_name.clone()))?;

        Ok(Self {
            company,
            folder,
            file_name,
            id,
            transcript,
        })
    }

    /// Playable path, `folder:id`. Not globally unique: companies record
    /// against overlapping id ranges.
    pub fn path(&self) -> String {
        format!("{}:{}", self.folder, self.id)
    }
}

/// First maximal run of ASCII digits in `s`, if any.
fn first_digit_run(s: &str) -> Option<String> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let run: String = s[start..].chars().take_while(|c| c.is_ascii_digit()).collect();
    Some(run)
}
