//! Catalog of recorded clips and the lookup structures built over it.
//!
//! The index is rebuilt wholesale by every load and is read-only afterwards,
//! so it is safe for unsynchronized concurrent reads. Records keep catalog
//! load order; wherever several records share a normalized transcript,
//! lookups return the earliest-loaded one. That tie-break is part of the
//! contract, not an accident of map iteration order.

mod loader;
mod record;

pub use record::{CatalogRecord, RecordError};

use crate::text::normalize;
use crate::Result;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Conventional folder categories a complete catalog is expected to carry.
const EXPECTED_FOLDERS: [&str; 5] = ["callflow", "digits", "type", "location", "names"];

/// Read-only lookup structures over a loaded catalog.
///
/// Three maps are built at load time: normalized transcript → records
/// (global), company → normalized transcript → records (scoped), and
/// folder → records. All map values are indices into the load-ordered
/// record list.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    records: Vec<CatalogRecord>,
    by_transcript: HashMap<String, Vec<usize>>,
    by_company: HashMap<String, HashMap<String, Vec<usize>>>,
    by_folder: HashMap<String, Vec<usize>>,
}

impl CatalogIndex {
    /// Build the three lookup maps over already-validated records.
    pub fn from_records(records: Vec<CatalogRecord>) -> Self {
        let mut by_transcript: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_company: HashMap<String, HashMap<String, Vec<usize>>> = HashMap::new();
        let mut by_folder: HashMap<String, Vec<usize>> = HashMap::new();

        for (i, record) in records.iter().enumerate() {
            let key = normalize(&record.transcript);
            by_transcript.entry(key.clone()).or_default().push(i);
            by_company
                .entry(record.company.clone())
                .or_default()
                .entry(key)
                .or_default()
                .push(i);
            by_folder.entry(record.folder.clone()).or_default().push(i);
        }

        debug!(
            records = records.len(),
            transcripts = by_transcript.len(),
            companies = by_company.len(),
            "catalog index built"
        );
        Self {
            records,
            by_transcript,
            by_company,
            by_folder,
        }
    }

    /// Load and index a catalog CSV from disk. Fatal on an unreadable source
    /// or missing required columns; invalid rows are skipped with a warning.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("loading audio catalog from {}", path.display());
        let file = std::fs::File::open(path)?;
        let index = Self::from_csv_reader(file)?;
        info!("loaded {} audio records", index.len());
        Ok(index)
    }

    /// Load and index a catalog CSV from any reader.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::from_records(loader::read_records(reader)?))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in load order.
    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    /// Exact-transcript lookup: the company tier first when `company` is
    /// given, then the global tier; optionally restricted to one folder.
    /// Returns the earliest-loaded candidate, or `None`.
    pub fn lookup(
        &self,
        text: &str,
        company: Option<&str>,
        folder: Option<&str>,
    ) -> Option<&CatalogRecord> {
        let key = normalize(text);
        if key.is_empty() {
            return None;
        }

        if let Some(company) = company {
            if let Some(scoped) = self.by_company.get(&company.to_lowercase()) {
                if let Some(record) = self.first_match(scoped.get(&key), folder) {
                    debug!(text, company, path = %record.path(), "company-tier match");
                    return Some(record);
                }
            }
        }

        let record = self.first_match(self.by_transcript.get(&key), folder);
        if let Some(record) = record {
            debug!(text, path = %record.path(), "global-tier match");
        }
        record
    }

    fn first_match(
        &self,
        indices: Option<&Vec<usize>>,
        folder: Option<&str>,
    ) -> Option<&CatalogRecord> {
        indices?
            .iter()
            .map(|&i| &self.records[i])
            .find(|record| folder.map_or(true, |f| record.folder == f))
    }

    /// All records whose normalized transcript starts with the normalized
    /// fragment. Diagnostic tooling only; not on the resolution path.
    pub fn prefix_search(
        &self,
        fragment: &str,
        company: Option<&str>,
        folder: Option<&str>,
    ) -> Vec<&CatalogRecord> {
        self.scan(fragment, company, folder, |transcript, fragment| {
            transcript.starts_with(fragment)
        })
    }

    /// All records whose normalized transcript contains the normalized
    /// fragment. Diagnostic tooling only; not on the resolution path.
    pub fn substring_search(
        &self,
        fragment: &str,
        company: Option<&str>,
        folder: Option<&str>,
    ) -> Vec<&CatalogRecord> {
        self.scan(fragment, company, folder, |transcript, fragment| {
            transcript.contains(fragment)
        })
    }

    fn scan(
        &self,
        fragment: &str,
        company: Option<&str>,
        folder: Option<&str>,
        matches: impl Fn(&str, &str) -> bool,
    ) -> Vec<&CatalogRecord> {
        let fragment = normalize(fragment);
        if fragment.is_empty() {
            return Vec::new();
        }
        let company = company.map(str::to_lowercase);

        let mut seen = HashSet::new();
        let mut hits = Vec::new();
        for record in &self.records {
            if let Some(company) = &company {
                if &record.company != company {
                    continue;
                }
            }
            if let Some(folder) = folder {
                if record.folder != folder {
                    continue;
                }
            }
            if !matches(&normalize(&record.transcript), &fragment) {
                continue;
            }
            if seen.insert(record.path()) {
                hits.push(record);
            }
        }
        hits
    }

    /// Companies present in the catalog, sorted.
    pub fn companies(&self) -> Vec<&str> {
        let mut companies: Vec<&str> = self.by_company.keys().map(String::as_str).collect();
        companies.sort_unstable();
        companies
    }

    /// Folders present in the catalog, sorted.
    pub fn folders(&self) -> Vec<&str> {
        let mut folders: Vec<&str> = self.by_folder.keys().map(String::as_str).collect();
        folders.sort_unstable();
        folders
    }

    /// All records in one folder, load order.
    pub fn records_in_folder(&self, folder: &str) -> Vec<&CatalogRecord> {
        self.by_folder
            .get(folder)
            .map(|indices| indices.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    /// All records for one company, load order.
    pub fn records_for_company(&self, company: &str) -> Vec<&CatalogRecord> {
        let company = company.to_lowercase();
        self.records
            .iter()
            .filter(|record| record.company == company)
            .collect()
    }

    /// Counts over the loaded catalog.
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            records: self.records.len(),
            unique_transcripts: self.by_transcript.len(),
            companies: self.by_company.len(),
            folders: self.by_folder.len(),
        }
    }

    /// Integrity findings over the loaded catalog. Everything reported here
    /// is a warning for operator review, never an error.
    pub fn validate(&self) -> IntegrityReport {
        let mut companies_by_path: HashMap<String, HashSet<&str>> = HashMap::new();
        for record in &self.records {
            companies_by_path
                .entry(record.path())
                .or_default()
                .insert(&record.company);
        }
        let mut duplicate_paths: Vec<String> = companies_by_path
            .into_iter()
            .filter(|(_, companies)| companies.len() > 1)
            .map(|(path, _)| path)
            .collect();
        duplicate_paths.sort_unstable();

        let empty_transcripts = self
            .records
            .iter()
            .filter(|record| normalize(&record.transcript).is_empty())
            .count();

        let missing_folders = EXPECTED_FOLDERS
            .iter()
            .filter(|folder| !self.by_folder.contains_key(**folder))
            .map(|folder| folder.to_string())
            .collect();

        IntegrityReport {
            duplicate_paths,
            empty_transcripts,
            missing_folders,
        }
    }
}

/// Catalog size counts.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub records: usize,
    pub unique_transcripts: usize,
    pub companies: usize,
    pub folders: usize,
}

/// Non-fatal integrity findings over a loaded catalog.
#[derive(Debug, Clone, Serialize)]
pub struct IntegrityReport {
    /// Paths shared by records from more than one company. Expected in
    /// practice; surfaced so operators know which ids are ambiguous without
    /// a company context.
    pub duplicate_paths: Vec<String>,
    /// Records whose transcript normalizes to nothing
    pub empty_transcripts: usize,
    /// Conventional folder categories absent from this catalog
    pub missing_folders: Vec<String>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.duplicate_paths.is_empty()
            && self.empty_transcripts == 0
            && self.missing_folders.is_empty()
    }
}
