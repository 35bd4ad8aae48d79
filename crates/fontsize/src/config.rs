//! Configuration file (fontsize.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;

use fontsize_github::{ClientConfig, CollectOptions, Collector, GithubClient, RepoRef};
use fontsize_static::RenderConfig;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    pub source: SourceConfig,
    pub site: SiteConfig,
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Directory holding one folder per font
    pub root: String,
    pub api_base: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            owner: "fontsource".to_string(),
            repo: "font-files".to_string(),
            branch: "main".to_string(),
            root: "fonts/variable".to_string(),
            api_base: "https://api.github.com".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub base_url: String,
    pub output: String,
    pub index_name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let render = RenderConfig::default();
        Self {
            title: render.title,
            base_url: render.base_url,
            output: render.output_dir.display().to_string(),
            index_name: render.index_name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    pub minify: bool,
    pub detail_pages: bool,
    pub write_json: bool,
    pub concurrency: usize,
    pub timeout_secs: u64,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: true,
            detail_pages: true,
            write_json: true,
            concurrency: 8,
            timeout_secs: 30,
        }
    }
}

/// Collection flags shared by `fetch` and `build`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CollectArgs {
    /// Only collect the first N fonts
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Only collect fonts whose id matches this regex
    #[arg(long)]
    pub only: Option<String>,

    /// Skip fonts that fail instead of aborting
    #[arg(long)]
    pub keep_going: bool,
}

/// Load configuration from `path` if it exists.
/// Returns an error if the file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No {} found, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

impl ConfigFile {
    /// Build a collector for the configured source.
    pub fn collector(&self, args: &CollectArgs) -> Result<Collector> {
        let repo = RepoRef::new(&self.source.owner, &self.source.repo)
            .with_branch(&self.source.branch);

        let client = GithubClient::new(
            repo,
            ClientConfig {
                api_base: self.source.api_base.clone(),
                timeout_secs: self.build.timeout_secs,
                ..Default::default()
            }
            .with_env_token(),
        )?;

        let only = args
            .only
            .as_deref()
            .map(Regex::new)
            .transpose()
            .context("Invalid --only pattern")?;

        Ok(Collector::new(
            client,
            CollectOptions {
                root: self.source.root.clone(),
                concurrency: self.build.concurrency,
                limit: args.limit,
                only,
                keep_going: args.keep_going,
            },
        ))
    }

    /// Render settings, with CLI overrides applied.
    pub fn render_config(&self, output: Option<PathBuf>, no_minify: bool) -> RenderConfig {
        RenderConfig {
            output_dir: output.unwrap_or_else(|| PathBuf::from(&self.site.output)),
            title: self.site.title.clone(),
            base_url: self.site.base_url.clone(),
            index_name: self.site.index_name.clone(),
            detail_pages: self.build.detail_pages,
            minify: self.build.minify && !no_minify,
            write_json: self.build.write_json,
        }
    }
}
