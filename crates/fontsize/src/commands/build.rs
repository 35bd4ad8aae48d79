//! Collect-and-render command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::{load_config, CollectArgs};

/// Run the build command.
pub async fn run(
    config_path: &Path,
    args: &CollectArgs,
    output: Option<PathBuf>,
    no_minify: bool,
) -> Result<()> {
    tracing::info!("Building font size table...");

    let config = load_config(config_path)?;
    let collector = config.collector(args)?;
    let render_config = config.render_config(output, no_minify);

    let dataset = collector.collect().await?;

    if !dataset.failed.is_empty() {
        tracing::warn!(
            "{} fonts could not be collected: {}",
            dataset.failed.len(),
            dataset.failed.join(", ")
        );
    }

    super::render_dataset(render_config, dataset).await?;

    Ok(())
}
