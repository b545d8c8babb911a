//! E2E tests using the mock cdnjs server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use cdnjs::mock_server::{Fixtures, MockServer, MockState};
use cdnjs::{CdnJsClient, CdnJsError, RequestOptions, SearchRequestOptions};

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    let client = reqwest::Client::new();
    let result = client.get(format!("{}/health", url)).send().await;

    assert!(result.is_err());
}

// =============================================================================
// Catalog Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_list_then_get_then_assets_workflow() {
    let server = MockServer::start().await;
    let client = CdnJsClient::with_base_url(server.url()).unwrap();

    // Step 1: List the catalog
    let libraries = client
        .list_libraries(None, None)
        .await
        .expect("Failed to list libraries");
    assert_eq!(libraries.len(), 3);

    // Step 2: Get every library and its versions
    for listed in &libraries {
        let name = listed.name().expect("listing includes names");
        let library = client
            .get_library(name, None, None)
            .await
            .expect("Failed to get library");

        assert_eq!(library.name(), Some(name));

        // Step 3: Fetch assets for each version with releases
        let versions = library.versions.clone().unwrap_or_default();
        for version in versions {
            match client.get_library_assets(name, &version, None, None).await {
                Ok(assets) => {
                    assert_eq!(assets.version(), Some(version.as_str()));
                    assert!(assets.orphaned_sri_files().is_empty());
                }
                Err(CdnJsError::ApiError { status_code, .. }) => {
                    // lodash.js fixture has no asset listings
                    assert_eq!(status_code, Some(404));
                }
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_listing_includes_latest_and_requested_fields() {
    let server = MockServer::start().await;
    let client = CdnJsClient::with_base_url(server.url()).unwrap();

    let libraries = client
        .list_libraries(Some(&RequestOptions::unspecified()), None)
        .await
        .unwrap();

    let jquery = &libraries[0];
    assert!(jquery.latest_main_file_url.is_some());
    assert!(jquery.versions.is_none());
    assert!(jquery.description.is_none());

    let options = RequestOptions::new().with_field("description").unwrap();
    let libraries = client.list_libraries(Some(&options), None).await.unwrap();
    assert!(libraries[0].description.is_some());

    server.shutdown().await;
}

#[tokio::test]
async fn test_get_library_with_all_fields() {
    let server = MockServer::start().await;
    let client = CdnJsClient::with_base_url(server.url()).unwrap();

    let vue = client
        .get_library("vue", Some(&RequestOptions::all()), None)
        .await
        .unwrap();

    assert_eq!(vue, Fixtures::vue());
    assert_eq!(vue.assets_for("2.6.12").map(|a| a.files().len()), Some(3));

    server.shutdown().await;
}

#[tokio::test]
async fn test_search_workflow() {
    let server = MockServer::start().await;
    let client = CdnJsClient::with_base_url(server.url()).unwrap();

    let hits = client
        .search_libraries(&SearchRequestOptions::new("framework"), None)
        .await
        .unwrap();
    let names: Vec<_> = hits.iter().filter_map(|l| l.name()).collect();
    assert_eq!(names, vec!["vue"]);

    let hits = client
        .search_libraries(&SearchRequestOptions::new("no such library"), None)
        .await
        .unwrap();
    assert!(hits.is_empty());

    server.shutdown().await;
}

#[tokio::test]
async fn test_human_readable_output_parses() {
    let server = MockServer::start().await;
    let client = CdnJsClient::with_base_url(server.url()).unwrap();

    let options = RequestOptions::minimal()
        .to_mutable()
        .with_human_readable(true)
        .unwrap();
    let jquery = client.get_library("jquery", Some(&options), None).await.unwrap();

    assert_eq!(jquery.version(), Some("3.7.1"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_library_added_during_test_is_served() {
    let server = MockServer::start_empty().await;
    let client = CdnJsClient::with_base_url(server.url()).unwrap();

    let result = client.get_library("left-pad", None, None).await;
    assert!(matches!(
        result,
        Err(CdnJsError::ApiError {
            status_code: Some(404),
            ..
        })
    ));

    {
        let state = server.state();
        let mut state = state.write().await;
        *state = std::mem::take(&mut *state)
            .with_library(Fixtures::minimal_library("left-pad", "1.3.0"));
    }

    let library = client.get_library("left-pad", None, None).await.unwrap();
    assert_eq!(library.version(), Some("1.3.0"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_missing_version_is_not_found() {
    let state = MockState::new().with_library(Fixtures::jquery());
    let server = MockServer::with_state(state).await;
    let client = CdnJsClient::with_base_url(server.url()).unwrap();

    let err = client
        .get_library_assets("jquery", "0.0.1", None, None)
        .await
        .unwrap_err();

    match err {
        CdnJsError::ApiError { message, .. } => assert_eq!(message, "Version not found"),
        other => panic!("expected ApiError, got {other:?}"),
    }

    server.shutdown().await;
}
