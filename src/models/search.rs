//! Library listing envelope.

use serde::{Deserialize, Serialize};

use crate::models::library::LibraryMetadata;

/// Response wrapper returned by the `libraries` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibrarySearchResult {
    /// Matching libraries.
    #[serde(default)]
    pub results: Option<Vec<LibraryMetadata>>,

    /// Number of results returned.
    #[serde(default)]
    pub total: u64,

    /// Number of libraries available in the catalog.
    #[serde(default)]
    pub available: u64,
}

impl LibrarySearchResult {
    /// Take the results, treating an absent array as empty.
    pub fn into_results(self) -> Vec<LibraryMetadata> {
        self.results.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_envelope() {
        let result: LibrarySearchResult = serde_json::from_value(serde_json::json!({
            "results": [
                { "name": "jquery", "latest": "https://cdnjs.cloudflare.com/ajax/libs/jquery/3.7.1/jquery.min.js" },
                { "name": "vue" }
            ],
            "total": 2,
            "available": 4321
        }))
        .unwrap();

        assert_eq!(result.total, 2);
        assert_eq!(result.available, 4321);

        let names: Vec<_> = result.into_results().iter().filter_map(|l| l.name().map(String::from)).collect();
        assert_eq!(names, vec!["jquery", "vue"]);
    }

    #[test]
    fn test_missing_results_is_empty() {
        let result: LibrarySearchResult = serde_json::from_str(r#"{"total":0}"#).unwrap();
        assert!(result.into_results().is_empty());
    }
}
