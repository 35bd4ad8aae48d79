//! The collected dataset and its JSON persistence.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filename::FontFormat;
use crate::record::FontRecord;

/// Where the dataset was collected from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Directory holding one folder per font
    pub root: String,
}

impl Default for SourceInfo {
    fn default() -> Self {
        Self {
            owner: "fontsource".to_string(),
            repo: "font-files".to_string(),
            branch: "main".to_string(),
            root: "fonts/variable".to_string(),
        }
    }
}

/// All records from one collection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub generated_at: DateTime<Utc>,
    pub source: SourceInfo,
    pub fonts: Vec<FontRecord>,

    /// Ids of fonts that could not be collected
    #[serde(default)]
    pub failed: Vec<String>,
}

/// Aggregate numbers shown in the page header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetTotals {
    pub fonts: usize,
    pub files: usize,
    pub woff2_bytes: u64,
}

/// Errors that can occur when reading or writing a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dataset JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Dataset {
    /// Create a dataset stamped with the current time.
    ///
    /// Fonts are sorted by id so output is stable across runs.
    pub fn new(source: SourceInfo, mut fonts: Vec<FontRecord>, mut failed: Vec<String>) -> Self {
        fonts.sort_by(|a, b| a.id.cmp(&b.id));
        failed.sort();

        Self {
            generated_at: Utc::now(),
            source,
            fonts,
            failed,
        }
    }

    pub fn totals(&self) -> DatasetTotals {
        DatasetTotals {
            fonts: self.fonts.len(),
            files: self.fonts.iter().map(FontRecord::file_count).sum(),
            woff2_bytes: self
                .fonts
                .iter()
                .map(|f| f.total_size(FontFormat::Woff2))
                .sum(),
        }
    }

    /// Look up a font by id.
    pub fn font(&self, id: &str) -> Option<&FontRecord> {
        self.fonts.iter().find(|f| f.id == id)
    }

    /// Load a dataset from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let content = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| DataError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the dataset as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), DataError> {
        let json = self.to_json().map_err(|source| DataError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| DataError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(path, json).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::FontMetadata;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn record(id: &str, size: u64) -> FontRecord {
        let sizes: BTreeMap<String, u64> = [(format!("{}-latin-wght-normal.woff2", id), size)]
            .into_iter()
            .collect();
        FontRecord::from_parts(FontMetadata::named(id, id.to_uppercase()), &sizes)
    }

    #[test]
    fn sorts_fonts_by_id() {
        let dataset = Dataset::new(
            SourceInfo::default(),
            vec![record("roboto", 1), record("inter", 2)],
            vec!["zilla".to_string(), "abel".to_string()],
        );

        let ids: Vec<_> = dataset.fonts.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["inter", "roboto"]);
        assert_eq!(dataset.failed, vec!["abel", "zilla"]);
        assert!(dataset.font("roboto").is_some());
    }

    #[test]
    fn computes_totals() {
        let dataset = Dataset::new(
            SourceInfo::default(),
            vec![record("inter", 100), record("roboto", 250)],
            vec![],
        );

        assert_eq!(
            dataset.totals(),
            DatasetTotals {
                fonts: 2,
                files: 2,
                woff2_bytes: 350,
            }
        );
    }

    #[test]
    fn saves_and_loads() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("fontsize.json");

        let dataset = Dataset::new(SourceInfo::default(), vec![record("inter", 42)], vec![]);
        dataset.save(&path).unwrap();

        let loaded = Dataset::load(&path).unwrap();
        assert_eq!(loaded, dataset);
    }

    #[test]
    fn reports_invalid_json() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Dataset::load(&path), Err(DataError::Json { .. })));
        assert!(matches!(
            Dataset::load(&temp.path().join("missing.json")),
            Err(DataError::Io { .. })
        ));
    }
}
