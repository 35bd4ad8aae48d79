//! Per-font size records.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::filename::{parse_file_name, FontFile, FontFormat};
use crate::metadata::FontMetadata;

/// File sizes and descriptive metadata for one font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontRecord {
    pub id: String,
    pub family: String,
    pub category: Option<String>,
    pub license: Option<String>,
    pub font_type: Option<String>,
    pub default_subset: String,
    pub subsets: Vec<String>,
    pub styles: Vec<String>,
    pub weights: Vec<u16>,

    /// Sorted, de-duplicated axis tags of `files`
    pub axes: Vec<String>,

    /// Files sorted by name
    pub files: Vec<FontFile>,

    pub last_modified: Option<String>,
}

impl FontRecord {
    /// Assemble a record from parsed metadata and a `name -> size` listing.
    ///
    /// Entries whose names do not follow the Fontsource layout are skipped.
    pub fn from_parts(metadata: FontMetadata, sizes: &BTreeMap<String, u64>) -> Self {
        let mut files = Vec::with_capacity(sizes.len());

        for (name, size) in sizes {
            match parse_file_name(&metadata.id, name, *size) {
                Some(file) => files.push(file),
                None => tracing::debug!("Skipping unrecognized file {} for {}", name, metadata.id),
            }
        }

        // BTreeMap iteration already yields names in order
        let axes: BTreeSet<String> = files.iter().map(|f| f.axis.clone()).collect();

        Self {
            default_subset: metadata.default_subset().to_string(),
            id: metadata.id,
            family: metadata.family,
            category: metadata.category,
            license: metadata.license,
            font_type: metadata.font_type,
            subsets: metadata.subsets,
            styles: metadata.styles,
            weights: metadata.weights,
            axes: axes.into_iter().collect(),
            files,
            last_modified: metadata.last_modified,
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Sum of all file sizes in `format`.
    pub fn total_size(&self, format: FontFormat) -> u64 {
        self.files
            .iter()
            .filter(|f| f.format == format)
            .map(|f| f.size)
            .sum()
    }

    /// Size of the file a typical page would load: default subset, normal
    /// style, preferring the `wght` axis.
    pub fn default_size(&self, format: FontFormat) -> Option<u64> {
        let candidates = || {
            self.files.iter().filter(move |f| {
                f.format == format && f.subset == self.default_subset && f.style == "normal"
            })
        };

        candidates()
            .find(|f| f.axis == "wght")
            .or_else(|| candidates().next())
            .map(|f| f.size)
    }

    /// Subsets actually present in the file listing.
    pub fn file_subsets(&self) -> Vec<String> {
        let subsets: BTreeSet<&str> = self.files.iter().map(|f| f.subset.as_str()).collect();
        subsets.into_iter().map(str::to_string).collect()
    }
}

/// Format a byte count with binary units.
pub fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;

    let value = bytes as f64;
    if value < KIB {
        return format!("{} B", bytes);
    }

    // Unit is chosen after rounding to one decimal
    let kib = (value / KIB * 10.0).round() / 10.0;
    if kib < KIB {
        format!("{:.1} KiB", kib)
    } else {
        format!("{:.1} MiB", value / MIB)
    }
}
