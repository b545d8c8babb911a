//! Mock cdnjs API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the cdnjs API
//! for integration and end-to-end testing. Unlike wiremock which mocks at the
//! HTTP level per-test, this server holds a small catalog and honours the
//! `fields`, `search` and `output` query parameters.
//!
//! # Example
//!
//! ```ignore
//! use cdnjs::mock_server::MockServer;
//! use cdnjs::CdnJsClient;
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = CdnJsClient::with_base_url(server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let jquery = client.get_library("jquery", None, None).await.unwrap();
//!     assert_eq!(jquery.name(), Some("jquery"));
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
