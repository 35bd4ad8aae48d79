//! Fontsource file name parsing.
//!
//! Variable font files are published as `{id}-{subset}-{axis}-{style}.{ext}`,
//! e.g. `open-sans-cyrillic-ext-wght-italic.woff2`. Both the font id and the
//! subset may contain dashes, so parsing anchors on the known id prefix and
//! splits the remainder from the right.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static AXIS_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Za-z]{4}|standard)$").expect("valid axis regex"));

/// Web font container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFormat {
    Woff2,
    Woff,
    Ttf,
}

impl FontFormat {
    /// Map a file extension to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "woff2" => Some(Self::Woff2),
            "woff" => Some(Self::Woff),
            "ttf" => Some(Self::Ttf),
            _ => None,
        }
    }

    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Woff2 => "woff2",
            Self::Woff => "woff",
            Self::Ttf => "ttf",
        }
    }
}

impl fmt::Display for FontFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A single font file with its measured size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFile {
    /// File name as listed in the repository
    pub name: String,

    /// Unicode subset (e.g. "latin", "cyrillic-ext", "[12]")
    pub subset: String,

    /// Axis tag ("wght", "slnt", "full", "standard", ...)
    pub axis: String,

    /// Font style ("normal" or "italic")
    pub style: String,

    /// Container format
    pub format: FontFormat,

    /// Size in bytes
    pub size: u64,
}

/// Whether `tag` looks like a variable axis tag used in Fontsource file names.
pub fn is_axis_tag(tag: &str) -> bool {
    AXIS_TAG.is_match(tag)
}

/// Parse a Fontsource file name belonging to `font_id`.
///
/// Returns `None` for names that do not follow the
/// `{id}-{subset}-{axis}-{style}.{ext}` layout.
pub fn parse_file_name(font_id: &str, name: &str, size: u64) -> Option<FontFile> {
    let (stem, ext) = name.rsplit_once('.')?;
    let format = FontFormat::from_extension(ext)?;

    let rest = stem.strip_prefix(font_id)?.strip_prefix('-')?;
    let (rest, style) = rest.rsplit_once('-')?;
    let (subset, axis) = rest.rsplit_once('-')?;

    if subset.is_empty() || style.is_empty() || !style.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    if !is_axis_tag(axis) {
        return None;
    }

    Some(FontFile {
        name: name.to_string(),
        subset: subset.to_string(),
        axis: axis.to_string(),
        style: style.to_string(),
        format,
        size,
    })
}
