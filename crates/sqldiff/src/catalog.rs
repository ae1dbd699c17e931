//! Comparison catalogs shown in the table view
//!
//! Catalog file format:
//! ```toml
//! [[comparison]]
//! id = 1
//! name = "Employee Query"
//! source = """SELECT NVL(x, 0) FROM t"""
//! target = """SELECT COALESCE(x, 0) FROM t"""
//! ```

use serde::Deserialize;
use sqldiff_core::Comparison;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUILTIN_CATALOG: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/samples.toml"));

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate comparison id #{0}")]
    DuplicateId(u32),
    #[error("catalog contains no comparisons")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "comparison")]
    comparisons: Vec<Comparison>,
}

/// Ordered list of comparisons
#[derive(Debug, Clone)]
pub struct Catalog {
    comparisons: Vec<Comparison>,
}

impl Catalog {
    /// The sample comparisons compiled into the binary
    pub fn builtin() -> Self {
        Self::from_toml_str(BUILTIN_CATALOG).expect("builtin catalog should parse")
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), count = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::from_comparisons(file.comparisons)
    }

    pub fn from_comparisons(comparisons: Vec<Comparison>) -> Result<Self, CatalogError> {
        if comparisons.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for comparison in &comparisons {
            if !seen.insert(comparison.id) {
                return Err(CatalogError::DuplicateId(comparison.id));
            }
        }
        Ok(Self { comparisons })
    }

    /// Single-entry catalog for an ad-hoc file pair
    pub fn from_pair(name: impl Into<String>, source: String, target: String) -> Self {
        Self {
            comparisons: vec![Comparison::new(1, name, source, target)],
        }
    }

    pub fn len(&self) -> usize {
        self.comparisons.len()
    }

    pub fn comparisons(&self) -> &[Comparison] {
        &self.comparisons
    }

    pub fn get(&self, index: usize) -> Option<&Comparison> {
        self.comparisons.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Comparison> {
        self.comparisons.get_mut(index)
    }
}
