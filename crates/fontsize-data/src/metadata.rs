//! Fontsource `metadata.json` documents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Variable font information as published by Fontsource.
///
/// Older metadata stores a plain flag, newer metadata maps axis tags to their
/// ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableInfo {
    Flag(bool),
    Axes(BTreeMap<String, serde_json::Value>),
}

impl Default for VariableInfo {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl VariableInfo {
    /// Axis tags declared by the metadata, if any.
    pub fn axis_tags(&self) -> Vec<String> {
        match self {
            Self::Flag(_) => Vec::new(),
            Self::Axes(axes) => axes.keys().cloned().collect(),
        }
    }

    pub fn is_variable(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Axes(axes) => !axes.is_empty(),
        }
    }
}

/// Parsed `metadata.json` of a single font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontMetadata {
    /// Fontsource id, also the directory name (e.g. "open-sans")
    pub id: String,

    /// Display family name (e.g. "Open Sans")
    pub family: String,

    #[serde(default)]
    pub subsets: Vec<String>,

    #[serde(default)]
    pub weights: Vec<u16>,

    #[serde(default)]
    pub styles: Vec<String>,

    /// Default subset, "latin" for most fonts
    #[serde(default)]
    pub def_subset: Option<String>,

    #[serde(default)]
    pub variable: VariableInfo,

    #[serde(default)]
    pub last_modified: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub license: Option<String>,

    /// Origin of the font ("google", "other", ...)
    #[serde(default, rename = "type")]
    pub font_type: Option<String>,
}

impl FontMetadata {
    /// Minimal metadata for a font whose `metadata.json` only names it.
    pub fn named(id: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            family: family.into(),
            subsets: Vec::new(),
            weights: Vec::new(),
            styles: Vec::new(),
            def_subset: None,
            variable: VariableInfo::default(),
            last_modified: None,
            category: None,
            license: None,
            font_type: None,
        }
    }

    /// Default subset, falling back to "latin".
    pub fn default_subset(&self) -> &str {
        self.def_subset.as_deref().unwrap_or("latin")
    }
}
