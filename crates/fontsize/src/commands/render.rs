//! Offline render command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fontsize_data::Dataset;

use crate::config::load_config;

/// Run the render command.
pub async fn run(
    config_path: &Path,
    input: PathBuf,
    output: Option<PathBuf>,
    no_minify: bool,
) -> Result<()> {
    let config = load_config(config_path)?;

    let dataset = Dataset::load(&input)
        .with_context(|| format!("Failed to load dataset from {}", input.display()))?;
    tracing::info!(
        "Rendering {} fonts collected at {}",
        dataset.fonts.len(),
        dataset.generated_at.to_rfc3339()
    );

    super::render_dataset(config.render_config(output, no_minify), dataset).await?;

    Ok(())
}
