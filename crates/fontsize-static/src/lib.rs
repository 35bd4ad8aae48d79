//! Static HTML renderer for font file size tables.
//!
//! Renders a collected dataset into self-contained HTML pages with a
//! client-side sortable and filterable table. No server is needed to browse
//! the output.

pub mod assets;
pub mod renderer;
pub mod templates;

pub use renderer::{RenderConfig, RenderError, RenderResult, StaticRenderer};
