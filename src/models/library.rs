//! Library metadata models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::error::Result;
use crate::models::assets::LibraryAssets;

/// Attributes shared by every library response.
///
/// Wire fields the models do not know about are kept in
/// [`extensions`](Self::extensions) so they survive a read/write cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryBaseMetadata {
    /// Library name (e.g., "jquery").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Library version (latest version for catalog entries).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Unrecognized wire fields.
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}

/// A library entry in the cdnjs catalog.
///
/// All fields are optional; the server only returns the fields requested
/// through [`RequestOptions`](crate::RequestOptions).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryMetadata {
    #[serde(flatten)]
    pub base: LibraryBaseMetadata,

    /// URL of the latest version's main file, as sent by the server.
    #[serde(rename = "latest", default, skip_serializing_if = "Option::is_none")]
    pub latest_main_file_url: Option<String>,

    /// SRI hash of the latest version's main file.
    #[serde(rename = "sri", default, skip_serializing_if = "Option::is_none")]
    pub latest_main_file_sri: Option<String>,

    /// Filename of the latest version's main file.
    #[serde(rename = "filename", default, skip_serializing_if = "Option::is_none")]
    pub latest_main_filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Project homepage, as sent by the server.
    #[serde(rename = "homepage", default, skip_serializing_if = "Option::is_none")]
    pub homepage_url: Option<String>,

    /// Per-version file listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<Vec<LibraryAssets>>,

    /// Every published version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versions: Option<Vec<String>>,
}

impl LibraryMetadata {
    /// Library name.
    pub fn name(&self) -> Option<&str> {
        self.base.name.as_deref()
    }

    /// Latest version.
    pub fn version(&self) -> Option<&str> {
        self.base.version.as_deref()
    }

    /// Parsed form of [`latest_main_file_url`](Self::latest_main_file_url).
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value is not an absolute URL.
    pub fn latest_main_file_uri(&self) -> Result<Option<Url>> {
        parse_optional_url(self.latest_main_file_url.as_deref())
    }

    /// Store a URL as the latest main file.
    pub fn set_latest_main_file_uri(&mut self, uri: Option<Url>) {
        self.latest_main_file_url = uri.map(String::from);
    }

    /// Parsed form of [`homepage_url`](Self::homepage_url).
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value is not an absolute URL.
    pub fn homepage_uri(&self) -> Result<Option<Url>> {
        parse_optional_url(self.homepage_url.as_deref())
    }

    /// Store a URL as the homepage.
    pub fn set_homepage_uri(&mut self, uri: Option<Url>) {
        self.homepage_url = uri.map(String::from);
    }

    /// Find the asset listing for a version.
    pub fn assets_for(&self, version: &str) -> Option<&LibraryAssets> {
        self.assets
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|a| a.version() == Some(version))
    }
}

fn parse_optional_url(raw: Option<&str>) -> Result<Option<Url>> {
    Ok(raw.map(Url::parse).transpose()?)
}
