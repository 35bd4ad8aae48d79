//! CLI subcommands.

pub mod build;
pub mod fetch;
pub mod init;
pub mod render;

use fontsize_data::Dataset;
use fontsize_static::{RenderConfig, RenderResult, StaticRenderer};

/// Render on the blocking pool; detail pages are rendered with rayon.
pub(crate) async fn render_dataset(
    config: RenderConfig,
    dataset: Dataset,
) -> anyhow::Result<RenderResult> {
    let result = tokio::task::spawn_blocking(move || StaticRenderer::new(config).render(&dataset))
        .await??;

    tracing::info!(
        "Rendered {} pages for {} fonts in {}ms",
        result.pages,
        result.fonts,
        result.duration_ms
    );
    tracing::info!("Output: {}", result.output_dir.display());

    Ok(result)
}
