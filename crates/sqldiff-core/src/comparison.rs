//! Named source/target statement pairs

use crate::align::{align, AlignmentResult};
use crate::diff::{DiffEngine, DiffResult};
use crate::equiv::is_equivalent;
use serde::{Deserialize, Serialize};

/// Match status shown for a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonStatus {
    /// Equal once whitespace is normalized
    Match,
    Differs,
}

impl ComparisonStatus {
    pub fn from_equivalent(equivalent: bool) -> Self {
        if equivalent {
            ComparisonStatus::Match
        } else {
            ComparisonStatus::Differs
        }
    }
}

/// A source-dialect statement and its target-dialect translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub id: u32,
    pub name: String,
    pub source: String,
    pub target: String,
}

impl Comparison {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn status(&self) -> ComparisonStatus {
        ComparisonStatus::from_equivalent(is_equivalent(&self.source, &self.target))
    }

    /// Line diff of source against target
    pub fn diff(&self) -> DiffResult {
        DiffEngine::new().diff_strings(&self.source, &self.target)
    }

    pub fn alignment(&self) -> AlignmentResult {
        align(&self.diff().segments)
    }
}
