//! Contents API response types.

use serde::Deserialize;

/// Kind of a repository entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
    Symlink,
    Submodule,
    #[serde(other)]
    Other,
}

/// One entry of a contents API response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentEntry {
    pub name: String,

    pub path: String,

    #[serde(rename = "type")]
    pub entry_type: EntryType,

    /// Size in bytes (0 for directories)
    #[serde(default)]
    pub size: u64,

    /// Raw download URL, only set for files
    #[serde(default)]
    pub download_url: Option<String>,
}

impl ContentEntry {
    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Dir
    }

    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }
}

/// A contents API reply: a directory listing or a single file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Contents {
    Dir(Vec<ContentEntry>),
    File(ContentEntry),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_directory_listing() {
        let json = r#"[
            {"name": "inter", "path": "fonts/variable/inter", "type": "dir", "size": 0,
             "download_url": null},
            {"name": "README.md", "path": "fonts/variable/README.md", "type": "file", "size": 120,
             "download_url": "https://raw.githubusercontent.com/x/y/main/README.md"}
        ]"#;

        let contents: Contents = serde_json::from_str(json).unwrap();

        let Contents::Dir(entries) = contents else {
            panic!("expected a directory listing");
        };
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_dir());
        assert!(entries[1].is_file());
        assert_eq!(entries[1].size, 120);
    }

    #[test]
    fn parses_single_file() {
        let json = r#"{"name": "metadata.json", "path": "fonts/variable/inter/metadata.json",
            "type": "file", "size": 512, "download_url": "https://example.test/metadata.json",
            "content": "e30=", "encoding": "base64"}"#;

        let contents: Contents = serde_json::from_str(json).unwrap();

        assert!(matches!(contents, Contents::File(ref entry) if entry.name == "metadata.json"));
    }

    #[test]
    fn maps_unknown_types() {
        let entry: ContentEntry =
            serde_json::from_str(r#"{"name": "x", "path": "x", "type": "mystery"}"#).unwrap();

        assert_eq!(entry.entry_type, EntryType::Other);
        assert_eq!(entry.download_url, None);
    }
}
