//! Mock server state management.
//!
//! Provides the in-memory catalog for the mock cdnjs API server.

use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::{LibraryAssets, LibraryMetadata};

/// Shared state for the mock server.
///
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Libraries indexed by name, in catalog order.
    pub libraries: IndexMap<String, LibraryMetadata>,

    /// Number reported as `available` by the listing endpoint.
    /// Defaults to the catalog size when unset.
    pub available: Option<u64>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a library to the catalog. Libraries without a name are ignored.
    pub fn with_library(mut self, library: LibraryMetadata) -> Self {
        if let Some(name) = library.name().map(str::to_string) {
            self.libraries.insert(name, library);
        }
        self
    }

    /// Override the reported `available` count.
    pub fn with_available(mut self, available: u64) -> Self {
        self.available = Some(available);
        self
    }

    /// Number of libraries the listing endpoint reports as available.
    pub fn available(&self) -> u64 {
        self.available.unwrap_or(self.libraries.len() as u64)
    }

    /// Get a library by exact name.
    pub fn get_library(&self, name: &str) -> Option<&LibraryMetadata> {
        self.libraries.get(name)
    }

    /// Get the assets of one library version.
    pub fn get_assets(&self, name: &str, version: &str) -> Option<&LibraryAssets> {
        self.get_library(name)?.assets_for(version)
    }

    /// List libraries whose name or keywords contain `search`, ignoring case.
    pub fn search_libraries(&self, search: Option<&str>) -> Vec<&LibraryMetadata> {
        let needle = search.map(str::to_lowercase);
        self.libraries
            .values()
            .filter(|l| match needle.as_deref() {
                None | Some("") => true,
                Some(needle) => {
                    l.name().is_some_and(|n| n.to_lowercase().contains(needle))
                        || l.keywords
                            .iter()
                            .flatten()
                            .any(|k| k.to_lowercase().contains(needle))
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::Fixtures;

    #[test]
    fn test_state_add_and_get_library() {
        let state = MockState::new().with_library(Fixtures::minimal_library("left-pad", "1.3.0"));

        let library = state.get_library("left-pad");
        assert!(library.is_some());
        assert_eq!(library.unwrap().version(), Some("1.3.0"));
        assert_eq!(state.available(), 1);
    }

    #[test]
    fn test_state_ignores_unnamed_library() {
        let state = MockState::new().with_library(LibraryMetadata::default());
        assert!(state.libraries.is_empty());
    }

    #[test]
    fn test_state_search_matches_name_and_keywords() {
        let state = MockState::new()
            .with_library(Fixtures::jquery())
            .with_library(Fixtures::vue())
            .with_library(Fixtures::minimal_library("lodash", "4.17.21"));

        assert_eq!(state.search_libraries(None).len(), 3);
        assert_eq!(state.search_libraries(Some("")).len(), 3);
        assert_eq!(state.search_libraries(Some("VUE")).len(), 1);
        assert_eq!(state.search_libraries(Some("dom")).len(), 1);
        assert!(state.search_libraries(Some("nothing")).is_empty());
    }

    #[test]
    fn test_state_get_assets() {
        let state = MockState::new().with_library(Fixtures::vue());

        assert!(state.get_assets("vue", "2.6.12").is_some());
        assert!(state.get_assets("vue", "0.0.1").is_none());
        assert!(state.get_assets("react", "2.6.12").is_none());
    }
}
