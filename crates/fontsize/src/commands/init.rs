//! Write a default configuration file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());
    tracing::info!("Run 'fontsize build' to collect sizes and render the table.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# fontsize configuration

[source]
# Repository holding one folder per font
owner = "fontsource"
repo = "font-files"
branch = "main"
root = "fonts/variable"
api_base = "https://api.github.com"

[site]
title = "Fontsource variable font file sizes"
# Prefix for links between generated pages
base_url = "./"
# Output directory for the generated pages
output = "."
index_name = "index.html"

[build]
minify = true
# One page per font listing every file
detail_pages = true
# Write fontsize.json next to the pages
write_json = true
# Fonts fetched at the same time
concurrency = 8
timeout_secs = 30
"#;
