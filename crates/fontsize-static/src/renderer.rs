//! Static page renderer.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;

use fontsize_data::{Dataset, FontFormat, FontRecord};

use crate::assets::AssetPipeline;
use crate::templates::{FileRow, FontContext, FontRow, IndexContext, TemplateEngine};

/// File name of the dataset written next to the pages.
pub const DATASET_FILE: &str = "fontsize.json";

/// Configuration for rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output directory
    pub output_dir: PathBuf,

    /// Page title
    pub title: String,

    /// Base URL prepended to links between pages
    pub base_url: String,

    /// File name of the overview page
    pub index_name: String,

    /// Write one page per font
    pub detail_pages: bool,

    /// Minify inlined CSS
    pub minify: bool,

    /// Write the dataset as JSON next to the pages
    pub write_json: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            title: "Fontsource variable font file sizes".to_string(),
            base_url: "./".to_string(),
            index_name: "index.html".to_string(),
            detail_pages: true,
            minify: true,
            write_json: true,
        }
    }
}

/// Result of a render.
#[derive(Debug)]
pub struct RenderResult {
    /// Number of HTML pages written
    pub pages: usize,

    /// Number of fonts in the table
    pub fonts: usize,

    /// Total render time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to serialize dataset: {0}")]
    SerializeError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),

    #[error("Fonts {first} and {second} would both be written to {page}")]
    DuplicatePage {
        page: String,
        first: String,
        second: String,
    },
}

/// Renders a dataset into static pages.
pub struct StaticRenderer {
    config: RenderConfig,
    templates: TemplateEngine,
}

impl StaticRenderer {
    /// Create a new renderer.
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            templates: TemplateEngine::new(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render the overview page, detail pages and dataset JSON.
    pub fn render(&self, dataset: &Dataset) -> Result<RenderResult, RenderError> {
        let start = Instant::now();

        if self.config.detail_pages {
            check_page_names(dataset)?;
        }

        fs::create_dir_all(&self.config.output_dir).map_err(|e| {
            RenderError::WriteError(format!("{}: {}", self.config.output_dir.display(), e))
        })?;

        let css = AssetPipeline::stylesheet(self.config.minify);
        let js = AssetPipeline::generate_js();
        let generated_at = dataset.generated_at.to_rfc3339();

        if dataset.fonts.is_empty() {
            tracing::warn!("Dataset contains no fonts, rendering an empty table");
        }

        let rows: Vec<FontRow> = dataset.fonts.iter().map(|f| self.font_row(f)).collect();

        let axes: BTreeSet<&str> = dataset
            .fonts
            .iter()
            .flat_map(|f| f.axes.iter().map(String::as_str))
            .collect();

        let index = IndexContext {
            title: self.config.title.clone(),
            base_url: self.config.base_url.clone(),
            css: css.clone(),
            js: js.clone(),
            generated_at: generated_at.clone(),
            source: dataset.source.clone(),
            totals: dataset.totals(),
            rows: rows.clone(),
            axes: axes.into_iter().map(str::to_string).collect(),
            failed: dataset.failed.clone(),
            json_url: self
                .config
                .write_json
                .then(|| format!("{}{}", self.config.base_url, DATASET_FILE)),
        };

        let html = self
            .templates
            .render_index(&index)
            .map_err(|e| RenderError::TemplateError(e.to_string()))?;
        self.write(&self.config.output_dir.join(&self.config.index_name), html)?;

        let mut pages = 1;

        if self.config.detail_pages {
            let results: Vec<Result<(), RenderError>> = dataset
                .fonts
                .par_iter()
                .zip(rows.par_iter())
                .map(|(font, row)| {
                    let ctx = FontContext {
                        title: self.config.title.clone(),
                        base_url: self.config.base_url.clone(),
                        css: css.clone(),
                        js: js.clone(),
                        generated_at: generated_at.clone(),
                        index_url: format!("{}{}", self.config.base_url, self.config.index_name),
                        font: row.clone(),
                        files: file_rows(font),
                    };
                    self.render_font_page(&ctx)
                })
                .collect();

            for result in results {
                result?;
                pages += 1;
            }
        }

        if self.config.write_json {
            let json = dataset
                .to_json()
                .map_err(|e| RenderError::SerializeError(e.to_string()))?;
            self.write(&self.config.output_dir.join(DATASET_FILE), json)?;
        }

        Ok(RenderResult {
            pages,
            fonts: dataset.fonts.len(),
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    fn font_row(&self, font: &FontRecord) -> FontRow {
        let subsets = if font.subsets.is_empty() {
            font.file_subsets().len()
        } else {
            font.subsets.len()
        };

        FontRow {
            id: font.id.clone(),
            family: font.family.clone(),
            category: font.category.clone().unwrap_or_default(),
            axes: font.axes.clone(),
            styles: font.styles.clone(),
            subset_count: subsets,
            file_count: font.file_count(),
            default_woff2: font.default_size(FontFormat::Woff2),
            total_woff2: font.total_size(FontFormat::Woff2),
            last_modified: font.last_modified.clone().unwrap_or_default(),
            detail_url: self
                .config
                .detail_pages
                .then(|| format!("{}{}", self.config.base_url, detail_page_name(&font.id))),
        }
    }

    fn render_font_page(&self, ctx: &FontContext) -> Result<(), RenderError> {
        let html = self
            .templates
            .render_font(ctx)
            .map_err(|e| RenderError::TemplateError(format!("{}: {}", ctx.font.id, e)))?;

        self.write(
            &self.config.output_dir.join(detail_page_name(&ctx.font.id)),
            html,
        )
    }

    fn write(&self, path: &Path, content: String) -> Result<(), RenderError> {
        fs::write(path, content)
            .map_err(|e| RenderError::WriteError(format!("{}: {}", path.display(), e)))?;
        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}

/// Fail when two fonts map to the same detail page.
fn check_page_names(dataset: &Dataset) -> Result<(), RenderError> {
    let mut seen: HashMap<String, &str> = HashMap::with_capacity(dataset.fonts.len());

    for font in &dataset.fonts {
        let page = detail_page_name(&font.id);
        if let Some(first) = seen.get(&page) {
            return Err(RenderError::DuplicatePage {
                page,
                first: first.to_string(),
                second: font.id.clone(),
            });
        }
        seen.insert(page, &font.id);
    }

    Ok(())
}

fn file_rows(font: &FontRecord) -> Vec<FileRow> {
    font.files
        .iter()
        .map(|f| FileRow {
            name: f.name.clone(),
            subset: f.subset.clone(),
            axis: f.axis.clone(),
            style: f.style.clone(),
            format: f.format.to_string(),
            size: f.size,
        })
        .collect()
}

/// Flat page name for a font, safe to use in URLs and file systems.
pub fn detail_page_name(id: &str) -> String {
    let slug: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();

    format!("font-{}.html", slug)
}
