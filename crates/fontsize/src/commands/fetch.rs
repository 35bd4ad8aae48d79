//! Dataset collection command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::{load_config, CollectArgs};

/// Run the fetch command.
pub async fn run(config_path: &Path, args: &CollectArgs, out: PathBuf) -> Result<()> {
    let config = load_config(config_path)?;

    tracing::info!(
        "Fetching file sizes from {}/{}@{}",
        config.source.owner,
        config.source.repo,
        config.source.branch
    );

    let dataset = config.collector(args)?.collect().await?;

    dataset
        .save(&out)
        .with_context(|| format!("Failed to save dataset to {}", out.display()))?;

    let totals = dataset.totals();
    tracing::info!(
        "Saved {} fonts ({} files) to {}",
        totals.fonts,
        totals.files,
        out.display()
    );

    Ok(())
}
