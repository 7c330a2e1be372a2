use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::shared::validation::validate_artifact_stem;

pub const FILENAME_COLUMN: &str = "filename";
pub const URL_COLUMN: &str = "url";

/// One CSV record keyed by header name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based line in the uploaded file
    pub line: u64,
    fields: HashMap<String, String>,
}

/// Why a row produced no artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingFilename,
    MissingUrl,
    InvalidFilename,
}

/// A row that passed validation and will be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedRow {
    pub line: u64,
    pub filename: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Accepted(AcceptedRow),
    Skipped { line: u64, reason: SkipReason },
}

impl Row {
    pub fn new(line: u64, fields: HashMap<String, String>) -> Self {
        Self { line, fields }
    }

    /// Trimmed value of a column; blank counts as absent
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Decide whether the row can be rendered
    pub fn classify(&self) -> RowOutcome {
        let skipped = |reason| RowOutcome::Skipped {
            line: self.line,
            reason,
        };

        let Some(filename) = self.get(FILENAME_COLUMN) else {
            return skipped(SkipReason::MissingFilename);
        };
        let Some(url) = self.get(URL_COLUMN) else {
            return skipped(SkipReason::MissingUrl);
        };
        if validate_artifact_stem(filename).is_err() {
            return skipped(SkipReason::InvalidFilename);
        }

        RowOutcome::Accepted(AcceptedRow {
            line: self.line,
            filename: filename.to_string(),
            url: url.to_string(),
        })
    }
}
