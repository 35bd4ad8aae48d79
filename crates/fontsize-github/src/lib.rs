//! GitHub contents API client and Fontsource size collector.
//!
//! Lists repository directories through the contents API, follows download
//! URLs for JSON files, and walks the Fontsource `font-files` repository to
//! build a [`fontsize_data::Dataset`].

pub mod client;
pub mod collector;
pub mod contents;

pub use client::{ClientConfig, GithubClient, GithubError, RepoRef};
pub use collector::{CollectError, CollectOptions, Collector};
pub use contents::{ContentEntry, Contents, EntryType};
