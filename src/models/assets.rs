//! Library asset models.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::library::LibraryBaseMetadata;

/// Files published for one version of a library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryAssets {
    #[serde(flatten)]
    pub base: LibraryBaseMetadata,

    /// Files as uploaded, before minification.
    #[serde(rename = "rawFiles", default, skip_serializing_if = "Option::is_none")]
    pub raw_files: Option<Vec<String>>,

    /// Files served by the CDN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,

    /// Subresource integrity hash per served file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sri: Option<IndexMap<String, String>>,
}

impl LibraryAssets {
    /// Library name.
    pub fn name(&self) -> Option<&str> {
        self.base.name.as_deref()
    }

    /// Version these assets belong to.
    pub fn version(&self) -> Option<&str> {
        self.base.version.as_deref()
    }

    /// Served files, or an empty slice if the server omitted them.
    pub fn files(&self) -> &[String] {
        self.files.as_deref().unwrap_or_default()
    }

    /// SRI hash for a served file.
    pub fn sri_for(&self, file: &str) -> Option<&str> {
        self.sri.as_ref()?.get(file).map(String::as_str)
    }

    /// SRI entries whose file is missing from [`files`](Self::files).
    ///
    /// Filenames are compared ignoring ASCII case.
    pub fn orphaned_sri_files(&self) -> Vec<&str> {
        let files = self.files();
        self.sri
            .iter()
            .flat_map(|sri| sri.keys())
            .filter(|key| !files.iter().any(|f| f.eq_ignore_ascii_case(key)))
            .map(String::as_str)
            .collect()
    }
}
