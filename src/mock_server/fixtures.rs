//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic catalog entries.

use indexmap::IndexMap;

use crate::{LibraryAssets, LibraryBaseMetadata, LibraryMetadata};

const CDN_BASE: &str = "https://cdnjs.cloudflare.com/ajax/libs";

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    /// Create a library with only a name and latest version.
    pub fn minimal_library(name: &str, version: &str) -> LibraryMetadata {
        LibraryMetadata {
            base: base(name, version),
            versions: Some(vec![version.to_string()]),
            ..Default::default()
        }
    }

    /// Create the asset listing for one version.
    ///
    /// Every served file gets an SRI entry.
    pub fn assets(name: &str, version: &str, files: &[&str]) -> LibraryAssets {
        let files: Vec<String> = files.iter().map(|f| f.to_string()).collect();
        let sri: IndexMap<String, String> = files
            .iter()
            .map(|f| (f.clone(), format!("sha512-{name}-{version}-{f}")))
            .collect();

        LibraryAssets {
            base: base(name, version),
            raw_files: Some(files.clone()),
            files: Some(files),
            sri: Some(sri),
        }
    }

    /// Create a fully populated library entry.
    pub fn library(
        name: &str,
        description: &str,
        main_file: &str,
        keywords: &[&str],
        releases: Vec<LibraryAssets>,
    ) -> LibraryMetadata {
        let versions: Vec<String> = releases
            .iter()
            .filter_map(|a| a.version().map(String::from))
            .collect();
        let latest = versions.last().cloned().unwrap_or_default();

        LibraryMetadata {
            base: base(name, &latest),
            latest_main_file_url: Some(format!("{CDN_BASE}/{name}/{latest}/{main_file}")),
            latest_main_file_sri: Some(format!("sha512-{name}-{latest}-{main_file}")),
            latest_main_filename: Some(main_file.to_string()),
            description: Some(description.to_string()),
            keywords: Some(keywords.iter().map(|k| k.to_string()).collect()),
            author: Some(format!("{name} contributors")),
            homepage_url: Some(format!("https://{name}.example.org/")),
            assets: Some(releases),
            versions: Some(versions),
        }
    }

    /// jQuery with two releases.
    pub fn jquery() -> LibraryMetadata {
        Self::library(
            "jquery",
            "JavaScript library for DOM operations",
            "jquery.min.js",
            &["jquery", "library", "dom"],
            vec![
                Self::assets("jquery", "3.6.0", &["jquery.js", "jquery.min.js"]),
                Self::assets(
                    "jquery",
                    "3.7.1",
                    &["jquery.js", "jquery.min.js", "jquery.slim.min.js"],
                ),
            ],
        )
    }

    /// Vue with two releases.
    pub fn vue() -> LibraryMetadata {
        Self::library(
            "vue",
            "Reactive, component-oriented view layer for modern web interfaces",
            "vue.global.prod.min.js",
            &["vue", "mvvm", "browser", "framework"],
            vec![
                Self::assets("vue", "2.6.12", &["vue.js", "vue.min.js", "vue.runtime.min.js"]),
                Self::assets("vue", "3.4.21", &["vue.global.js", "vue.global.prod.min.js"]),
            ],
        )
    }

    /// The catalog served by [`MockServer::start`](super::MockServer::start).
    pub fn default_catalog() -> Vec<LibraryMetadata> {
        vec![
            Self::jquery(),
            Self::vue(),
            Self::minimal_library("lodash.js", "4.17.21"),
        ]
    }
}

fn base(name: &str, version: &str) -> LibraryBaseMetadata {
    LibraryBaseMetadata {
        name: Some(name.to_string()),
        version: Some(version.to_string()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_library() {
        let library = Fixtures::minimal_library("left-pad", "1.3.0");
        assert_eq!(library.name(), Some("left-pad"));
        assert_eq!(library.versions, Some(vec!["1.3.0".to_string()]));
        assert!(library.assets.is_none());
    }

    #[test]
    fn test_library_latest_is_last_release() {
        let jquery = Fixtures::jquery();
        assert_eq!(jquery.version(), Some("3.7.1"));
        assert_eq!(
            jquery.latest_main_file_url.as_deref(),
            Some("https://cdnjs.cloudflare.com/ajax/libs/jquery/3.7.1/jquery.min.js")
        );
        assert!(jquery.latest_main_file_uri().unwrap().is_some());
    }

    #[test]
    fn test_assets_have_sri_for_every_file() {
        for library in Fixtures::default_catalog() {
            for assets in library.assets.iter().flatten() {
                assert!(assets.orphaned_sri_files().is_empty());
                assert_eq!(assets.sri.as_ref().map(IndexMap::len), Some(assets.files().len()));
            }
        }
    }
}
