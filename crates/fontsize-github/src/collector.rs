//! Walks the Fontsource repository and collects per-font file sizes.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use regex::Regex;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use fontsize_data::{Dataset, FontMetadata, FontRecord, SourceInfo};

use crate::client::{GithubClient, GithubError};

/// Options controlling which fonts are collected and how.
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Directory holding one folder per font
    pub root: String,

    /// Maximum number of fonts fetched at the same time
    pub concurrency: usize,

    /// Stop after this many fonts (applied after `only`)
    pub limit: Option<usize>,

    /// Only collect fonts whose id matches
    pub only: Option<Regex>,

    /// Record failed fonts instead of aborting
    pub keep_going: bool,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            root: "fonts/variable".to_string(),
            concurrency: 8,
            limit: None,
            only: None,
            keep_going: false,
        }
    }
}

/// Errors that can occur during collection.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("Failed to list fonts under {root}: {source}")]
    Listing {
        root: String,
        #[source]
        source: GithubError,
    },

    #[error("Failed to collect font {id}: {source}")]
    Font {
        id: String,
        #[source]
        source: GithubError,
    },

    #[error("Collection task failed: {0}")]
    Task(String),
}

/// Collects a [`Dataset`] from a Fontsource-style repository.
pub struct Collector {
    client: Arc<GithubClient>,
    options: CollectOptions,
}

impl Collector {
    pub fn new(client: GithubClient, options: CollectOptions) -> Self {
        Self {
            client: Arc::new(client),
            options,
        }
    }

    fn root(&self) -> &str {
        self.options.root.trim_matches('/')
    }

    /// Apply the `only` filter, then the limit.
    fn select(&self, names: Vec<String>) -> Vec<String> {
        let filtered = names.into_iter().filter(|name| {
            self.options
                .only
                .as_ref()
                .map_or(true, |pattern| pattern.is_match(name))
        });

        match self.options.limit {
            Some(limit) => filtered.take(limit).collect(),
            None => filtered.collect(),
        }
    }

    /// Collect all selected fonts.
    pub async fn collect(&self) -> Result<Dataset, CollectError> {
        let start = Instant::now();
        let root = self.root().to_string();

        let names = self
            .client
            .folder_names(&root)
            .await
            .map_err(|source| CollectError::Listing {
                root: root.clone(),
                source,
            })?;
        let available = names.len();
        let ids = self.select(names);

        tracing::info!(
            "Collecting {} of {} fonts from {}/{}",
            ids.len(),
            available,
            self.client.repo().owner,
            self.client.repo().name
        );

        let mut tasks = spawn_bounded(ids, self.options.concurrency, |id| {
            let client = Arc::clone(&self.client);
            let root = root.clone();
            async move {
                let result = collect_font(&client, &root, &id).await;
                result.map_err(|source| CollectError::Font { id, source })
            }
        });

        let mut fonts = Vec::new();
        let mut failed = Vec::new();

        while let Some(joined) = tasks.join_next().await {
            let (id, result) = joined.map_err(|e| CollectError::Task(e.to_string()))?;

            match result {
                Ok(record) => {
                    tracing::debug!("Collected {} ({} files)", id, record.file_count());
                    fonts.push(record);
                }
                Err(e) if self.options.keep_going => {
                    tracing::warn!("{}", e);
                    failed.push(id);
                }
                Err(e) => {
                    tasks.abort_all();
                    return Err(e);
                }
            }
        }

        let repo = self.client.repo();
        let dataset = Dataset::new(
            SourceInfo {
                owner: repo.owner.clone(),
                repo: repo.name.clone(),
                branch: repo.branch.clone(),
                root,
            },
            fonts,
            failed,
        );

        tracing::info!(
            "Collected {} fonts ({} failed) in {}ms",
            dataset.fonts.len(),
            dataset.failed.len(),
            start.elapsed().as_millis()
        );

        Ok(dataset)
    }
}

/// Spawn one task per id, with at most `limit` of them running at once.
fn spawn_bounded<F, Fut, T>(
    ids: Vec<String>,
    limit: usize,
    task: F,
) -> JoinSet<(String, Result<T, CollectError>)>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<T, CollectError>> + Send + 'static,
    T: Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let mut tasks = JoinSet::new();

    for id in ids {
        let semaphore = Arc::clone(&semaphore);
        let work = task(id.clone());

        tasks.spawn(async move {
            let result = match semaphore.acquire_owned().await {
                Ok(_permit) => work.await,
                Err(e) => Err(CollectError::Task(e.to_string())),
            };
            (id, result)
        });
    }

    tasks
}

/// Fetch the file listing and metadata of one font.
async fn collect_font(
    client: &GithubClient,
    root: &str,
    id: &str,
) -> Result<FontRecord, GithubError> {
    let base = format!("{}/{}", root, id);
    let files_path = format!("{}/files", base);
    let metadata_path = format!("{}/metadata.json", base);

    let (sizes, mut metadata) = tokio::try_join!(
        client.file_sizes(&files_path),
        client.get_json_file::<FontMetadata>(&metadata_path),
    )?;

    // File names are prefixed with the folder name
    if metadata.id != id {
        tracing::debug!("Metadata id {} differs from folder {}", metadata.id, id);
        metadata.id = id.to_string();
    }

    Ok(FontRecord::from_parts(metadata, &sizes))
}
