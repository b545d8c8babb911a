//! cdnjs API client library.
//!
//! A Rust library for the read-only [cdnjs](https://cdnjs.com) catalog API:
//! list and search libraries, fetch one library's metadata, and fetch the
//! files published for one of its versions.
//!
//! # Quick Start
//!
//! ```no_run
//! use cdnjs::{CdnJsClient, RequestOptions, SearchRequestOptions};
//!
//! #[tokio::main]
//! async fn main() -> cdnjs::Result<()> {
//!     let client = CdnJsClient::new()?;
//!
//!     // Search the catalog
//!     let hits = client
//!         .search_libraries(&SearchRequestOptions::new("date picker"), None)
//!         .await?;
//!     println!("Found {} libraries", hits.len());
//!
//!     // Fetch one library with every known attribute
//!     let vue = client
//!         .get_library("vue", Some(&RequestOptions::all()), None)
//!         .await?;
//!     println!("Latest vue: {:?}", vue.version());
//!
//!     // Fetch the files of one version
//!     let assets = client.get_library_assets("vue", "2.6.12", None, None).await?;
//!     for file in assets.files() {
//!         println!("  {file} {}", assets.sri_for(file).unwrap_or("-"));
//!     }
//!
//!     client.close().await;
//!     Ok(())
//! }
//! ```
//!
//! # Request options
//!
//! [`RequestOptions`] selects the attributes the server returns (`fields`)
//! and whether it pretty-prints (`output=human`). Three frozen presets exist:
//! [`RequestOptions::unspecified`], [`RequestOptions::minimal`] and
//! [`RequestOptions::all`]. Modifying a preset fails with
//! [`CdnJsError::InvalidOperation`]; call [`RequestOptions::to_mutable`] for
//! an editable copy.
//!
//! Library listing and lookup default to the minimal preset. Asset lookup
//! defaults to the unspecified preset so the full file listing comes back.
//!
//! # Cancellation
//!
//! Every operation takes an optional
//! [`CancellationToken`](tokio_util::sync::CancellationToken). A token that is
//! already cancelled fails the call with [`CdnJsError::Cancelled`] before any
//! request is sent.
//!
//! # Configuration
//!
//! [`CdnJsClient::from_env`] reads:
//!
//! - `CDNJS_API_URL` (optional) - Base URL (defaults to `https://api.cdnjs.com/`)

pub mod cli;
mod client;
mod error;
mod fields;
mod models;
mod options;
mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{CdnJsClient, DEFAULT_API_URL};
pub use error::{CdnJsError, Result};
pub use fields::{field_names, FieldNameRegistry, FieldSet};
pub use options::{QueryString, RequestOptions, SearchRequestOptions, MINIMAL_FIELDS};
pub use output::PrettyPrint;

// Re-export models
pub use models::{LibraryAssets, LibraryBaseMetadata, LibraryMetadata, LibrarySearchResult};

pub use tokio_util::sync::CancellationToken;
