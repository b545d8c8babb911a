//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{LibraryAssets, LibraryMetadata};

/// Trait for human-readable key-value output.
///
/// Implemented by model types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for LibraryMetadata {
    fn pretty_print(&self) -> String {
        let name = self.name().unwrap_or("(unnamed)");
        let divider = "─".repeat(name.len().max(30));

        let mut lines = vec![format!("Library: {}", name), divider];

        if let Some(version) = self.version() {
            lines.push(format!("Version:        {}", version));
        }

        if let Some(ref description) = self.description {
            lines.push(format!("Description:    {}", description));
        }

        if let Some(ref author) = self.author {
            lines.push(format!("Author:         {}", author));
        }

        if let Some(ref homepage) = self.homepage_url {
            lines.push(format!("Homepage:       {}", homepage));
        }

        if let Some(ref latest) = self.latest_main_file_url {
            lines.push(format!("Latest:         {}", latest));
        }

        if let Some(ref sri) = self.latest_main_file_sri {
            lines.push(format!("SRI:            {}", sri));
        }

        if let Some(ref keywords) = self.keywords {
            if !keywords.is_empty() {
                lines.push(format!("Keywords:       {}", keywords.join(", ")));
            }
        }

        if let Some(ref versions) = self.versions {
            lines.push(format!("Versions:       {} published", versions.len()));
        }

        if let Some(ref assets) = self.assets {
            lines.push(format!("Assets:         {} versions listed", assets.len()));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for LibraryAssets {
    fn pretty_print(&self) -> String {
        let header = match (self.name(), self.version()) {
            (Some(name), Some(version)) => format!("Assets: {}@{}", name, version),
            (Some(name), None) => format!("Assets: {}", name),
            (None, Some(version)) => format!("Assets: {}", version),
            (None, None) => "Assets".to_string(),
        };
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider];

        for file in self.files() {
            match self.sri_for(file) {
                Some(sri) => lines.push(format!("{}  {}", file, sri)),
                None => lines.push(file.clone()),
            }
        }

        if let Some(ref raw) = self.raw_files {
            lines.push(format!("\n{} raw files, {} served", raw.len(), self.files().len()));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_pretty_print_format() {
        let library: LibraryMetadata = serde_json::from_value(serde_json::json!({
            "name": "jquery",
            "version": "3.7.1",
            "keywords": ["jquery", "dom"]
        }))
        .unwrap();

        let output = library.pretty_print();
        assert!(output.starts_with("Library: jquery"));
        assert!(output.contains("Version:        3.7.1"));
        assert!(output.contains("jquery, dom"));
    }

    #[test]
    fn test_assets_pretty_print_lists_files_with_sri() {
        let assets: LibraryAssets = serde_json::from_value(serde_json::json!({
            "name": "vue",
            "version": "2.6.12",
            "files": ["vue.js", "vue.min.js"],
            "sri": { "vue.min.js": "sha512-bbb" }
        }))
        .unwrap();

        let output = assets.pretty_print();
        assert!(output.starts_with("Assets: vue@2.6.12"));
        assert!(output.contains("vue.min.js  sha512-bbb"));
        assert!(output.lines().any(|l| l == "vue.js"));
    }
}
