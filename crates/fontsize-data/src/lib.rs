//! Data model for Fontsource variable font file sizes.
//!
//! Parses Fontsource `metadata.json` documents and file names, and assembles
//! them into per-font records and a serializable dataset.

pub mod dataset;
pub mod filename;
pub mod metadata;
pub mod record;

pub use dataset::{DataError, Dataset, DatasetTotals, SourceInfo};
pub use filename::{is_axis_tag, parse_file_name, FontFile, FontFormat};
pub use metadata::{FontMetadata, VariableInfo};
pub use record::{format_size, FontRecord};
