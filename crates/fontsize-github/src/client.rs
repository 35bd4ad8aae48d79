//! GitHub contents API client.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::contents::{ContentEntry, Contents};

/// The contents API returns at most this many entries per directory.
const LISTING_CAP: usize = 1000;

/// A repository and the branch to read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
    pub branch: String,
}

impl RepoRef {
    /// Reference the `main` branch of `owner/name`.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            branch: "main".to_string(),
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }
}

/// HTTP settings for the client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, without trailing slash
    pub api_base: String,

    /// Bearer token sent with every request
    pub token: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            token: None,
            timeout_secs: 30,
            user_agent: concat!("fontsize/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Pick up `GITHUB_TOKEN` from the environment when set and non-empty.
    pub fn with_env_token(mut self) -> Self {
        self.token = std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());
        self
    }
}

/// Errors that can occur when talking to GitHub.
#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unable to fetch {url}: status code {status}")]
    Status { url: String, status: u16 },

    #[error("GitHub API rate limit exceeded (resets at {})", describe_reset(.reset))]
    RateLimited { reset: Option<u64> },

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Not a file: {0}")]
    NotAFile(String),

    #[error("File has no download URL: {0}")]
    MissingDownloadUrl(String),

    #[error("Invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Client for one repository's contents.
pub struct GithubClient {
    http: Client,
    api_base: String,
    repo: RepoRef,
}

impl GithubClient {
    /// Create a new client.
    pub fn new(repo: RepoRef, config: ClientConfig) -> Result<Self, GithubError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| GithubError::ClientBuild(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        } else {
            tracing::warn!(
                "GITHUB_TOKEN is not set, requests are subject to anonymous rate limits"
            );
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| GithubError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            repo,
        })
    }

    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    /// Contents API URL for a repository path.
    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base,
            self.repo.owner,
            self.repo.name,
            path.trim_matches('/')
        )
    }

    /// Send a request and return the body of a 200 response.
    async fn fetch(&self, url: &str, request: RequestBuilder) -> Result<Vec<u8>, GithubError> {
        let response = request.send().await.map_err(|source| GithubError::Request {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            if is_rate_limited(status, response.headers()) {
                let reset = response
                    .headers()
                    .get("x-ratelimit-reset")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok());
                return Err(GithubError::RateLimited { reset });
            }

            return Err(GithubError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| GithubError::Request {
            url: url.to_string(),
            source,
        })?;

        Ok(body.to_vec())
    }

    /// Fetch the contents of a repository path.
    pub async fn get_contents(&self, path: &str) -> Result<Contents, GithubError> {
        let url = self.contents_url(path);
        tracing::debug!("GET {}", url);

        let request = self.http.get(&url).query(&[("ref", &self.repo.branch)]);
        let body = self.fetch(&url, request).await?;

        serde_json::from_slice(&body).map_err(|source| GithubError::Decode { url, source })
    }

    /// Fetch a directory listing.
    async fn list(&self, path: &str) -> Result<Vec<ContentEntry>, GithubError> {
        match self.get_contents(path).await? {
            Contents::Dir(entries) => {
                if entries.len() >= LISTING_CAP {
                    tracing::warn!(
                        "Listing of {} has {} entries and may be truncated by the contents API",
                        path,
                        entries.len()
                    );
                }
                Ok(entries)
            }
            Contents::File(_) => Err(GithubError::NotADirectory(path.to_string())),
        }
    }

    /// Names of the subdirectories of `path`.
    pub async fn folder_names(&self, path: &str) -> Result<Vec<String>, GithubError> {
        Ok(self
            .list(path)
            .await?
            .into_iter()
            .filter(ContentEntry::is_dir)
            .map(|entry| entry.name)
            .collect())
    }

    /// Sizes of the files directly inside `path`, keyed by file name.
    pub async fn file_sizes(&self, path: &str) -> Result<BTreeMap<String, u64>, GithubError> {
        Ok(self
            .list(path)
            .await?
            .into_iter()
            .filter(ContentEntry::is_file)
            .map(|entry| (entry.name, entry.size))
            .collect())
    }

    /// Download a file and decode it as JSON.
    pub async fn get_json_file<T: DeserializeOwned>(&self, path: &str) -> Result<T, GithubError> {
        let entry = match self.get_contents(path).await? {
            Contents::File(entry) => entry,
            Contents::Dir(_) => return Err(GithubError::NotAFile(path.to_string())),
        };

        let url = entry
            .download_url
            .ok_or_else(|| GithubError::MissingDownloadUrl(path.to_string()))?;
        tracing::debug!("GET {}", url);

        let body = self.fetch(&url, self.http.get(&url)).await?;

        serde_json::from_slice(&body).map_err(|source| GithubError::Decode { url, source })
    }
}

fn describe_reset(reset: &Option<u64>) -> String {
    reset.map_or_else(|| "unknown".to_string(), |epoch| format!("epoch {}", epoch))
}

fn is_rate_limited(status: StatusCode, headers: &HeaderMap) -> bool {
    let exhausted = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0");

    (status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS) && exhausted
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;

    fn client(server: &Server, token: Option<&str>) -> GithubClient {
        GithubClient::new(
            RepoRef::new("fontsource", "font-files"),
            ClientConfig {
                api_base: server.url(),
                token: token.map(str::to_string),
                ..Default::default()
            },
        )
        .unwrap()
    }

    const LISTING: &str = r#"[
        {"name": "inter", "path": "fonts/variable/inter", "type": "dir", "size": 0},
        {"name": "roboto", "path": "fonts/variable/roboto", "type": "dir", "size": 0},
        {"name": "README.md", "path": "fonts/variable/README.md", "type": "file", "size": 88}
    ]"#;

    #[tokio::test]
    async fn lists_folder_names() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/fontsource/font-files/contents/fonts/variable")
            .match_query(Matcher::UrlEncoded("ref".into(), "main".into()))
            .match_header("accept", "application/vnd.github+json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(LISTING)
            .create_async()
            .await;

        let names = client(&server, None)
            .folder_names("fonts/variable/")
            .await
            .unwrap();

        assert_eq!(names, vec!["inter", "roboto"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn lists_file_sizes() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repos/fontsource/font-files/contents/fonts/variable")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(LISTING)
            .create_async()
            .await;

        let sizes = client(&server, None)
            .file_sizes("fonts/variable")
            .await
            .unwrap();

        assert_eq!(sizes.len(), 1);
        assert_eq!(sizes.get("README.md"), Some(&88));
    }

    #[tokio::test]
    async fn sends_bearer_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/fontsource/font-files/contents/fonts")
            .match_query(Matcher::Any)
            .match_header("authorization", "Bearer secret")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let names = client(&server, Some("secret"))
            .folder_names("fonts")
            .await
            .unwrap();

        assert!(names.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn downloads_json_file() {
        let mut server = Server::new_async().await;
        let download_url = format!("{}/raw/inter/metadata.json", server.url());

        server
            .mock(
                "GET",
                "/repos/fontsource/font-files/contents/fonts/variable/inter/metadata.json",
            )
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(format!(
                r#"{{"name": "metadata.json", "path": "fonts/variable/inter/metadata.json",
                    "type": "file", "size": 30, "download_url": "{}"}}"#,
                download_url
            ))
            .create_async()
            .await;
        server
            .mock("GET", "/raw/inter/metadata.json")
            .with_status(200)
            .with_body(r#"{"id": "inter", "family": "Inter"}"#)
            .create_async()
            .await;

        let value: serde_json::Value = client(&server, None)
            .get_json_file("fonts/variable/inter/metadata.json")
            .await
            .unwrap();

        assert_eq!(value["family"], "Inter");
    }

    #[tokio::test]
    async fn reports_status_code() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repos/fontsource/font-files/contents/missing")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let err = client(&server, None).folder_names("missing").await.unwrap_err();

        assert!(matches!(err, GithubError::Status { status: 404, .. }));
        assert!(err.to_string().contains("status code 404"));
    }

    #[tokio::test]
    async fn detects_rate_limit() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repos/fontsource/font-files/contents/fonts")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_header("x-ratelimit-remaining", "0")
            .with_header("x-ratelimit-reset", "1700000000")
            .create_async()
            .await;

        let err = client(&server, None).folder_names("fonts").await.unwrap_err();

        assert!(matches!(
            err,
            GithubError::RateLimited {
                reset: Some(1_700_000_000)
            }
        ));
    }

    #[tokio::test]
    async fn detects_secondary_rate_limit() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repos/fontsource/font-files/contents/fonts")
            .match_query(Matcher::Any)
            .with_status(429)
            .with_header("x-ratelimit-remaining", "0")
            .create_async()
            .await;

        let err = client(&server, None).folder_names("fonts").await.unwrap_err();

        assert!(matches!(err, GithubError::RateLimited { reset: None }));
        assert!(err.to_string().contains("unknown"));
    }

    #[tokio::test]
    async fn forbidden_with_quota_left_is_a_status_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repos/fontsource/font-files/contents/fonts")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_header("x-ratelimit-remaining", "42")
            .create_async()
            .await;
        server
            .mock("GET", "/repos/fontsource/font-files/contents/private")
            .match_query(Matcher::Any)
            .with_status(403)
            .create_async()
            .await;

        let client = client(&server, None);

        assert!(matches!(
            client.folder_names("fonts").await,
            Err(GithubError::Status { status: 403, .. })
        ));
        assert!(matches!(
            client.folder_names("private").await,
            Err(GithubError::Status { status: 403, .. })
        ));
    }

    #[tokio::test]
    async fn keeps_every_entry_of_a_full_listing() {
        let mut server = Server::new_async().await;
        let listing: Vec<serde_json::Value> = (0..LISTING_CAP)
            .map(|i| {
                serde_json::json!({
                    "name": format!("font-{:04}", i),
                    "path": format!("fonts/variable/font-{:04}", i),
                    "type": "dir"
                })
            })
            .collect();
        server
            .mock("GET", "/repos/fontsource/font-files/contents/fonts/variable")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(serde_json::Value::Array(listing).to_string())
            .create_async()
            .await;

        let names = client(&server, None)
            .folder_names("fonts/variable")
            .await
            .unwrap();

        assert_eq!(names.len(), 1000);
        assert_eq!(names.first().map(String::as_str), Some("font-0000"));
        assert_eq!(names.last().map(String::as_str), Some("font-0999"));
    }

    #[tokio::test]
    async fn rejects_wrong_shapes() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repos/fontsource/font-files/contents/file.json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"name": "file.json", "path": "file.json", "type": "file", "size": 2}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/repos/fontsource/font-files/contents/dir")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = client(&server, None);

        assert!(matches!(
            client.folder_names("file.json").await,
            Err(GithubError::NotADirectory(_))
        ));
        assert!(matches!(
            client.get_json_file::<serde_json::Value>("dir").await,
            Err(GithubError::NotAFile(_))
        ));
        assert!(matches!(
            client.get_json_file::<serde_json::Value>("file.json").await,
            Err(GithubError::MissingDownloadUrl(_))
        ));
    }
}
