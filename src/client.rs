//! cdnjs API client.
//!
//! Composes request URLs from a resource path and rendered
//! [`QueryString`] options, issues GET requests and decodes the
//! JSON bodies into model types.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::{CdnJsError, Result};
use crate::models::{LibraryAssets, LibraryMetadata, LibrarySearchResult};
use crate::options::{QueryString, RequestOptions, SearchRequestOptions};

/// Base address of the public cdnjs API.
pub const DEFAULT_API_URL: &str = "https://api.cdnjs.com/";
const LIBRARIES: &str = "libraries";
const USER_AGENT: &str = concat!("cdnjs/", env!("CARGO_PKG_VERSION"));

/// cdnjs API client.
///
/// This struct is cheaply cloneable; clones share the same underlying
/// connection pool. Calling [`close`](Self::close) on any clone releases
/// the pool for all of them.
///
/// # Example
///
/// ```no_run
/// use cdnjs::{CdnJsClient, RequestOptions};
///
/// # async fn example() -> cdnjs::Result<()> {
/// let client = CdnJsClient::new()?;
///
/// let jquery = client.get_library("jquery", None, None).await?;
/// println!("latest: {:?}", jquery.version());
///
/// let assets = client
///     .get_library_assets("jquery", "3.7.1", None, None)
///     .await?;
/// println!("{} files", assets.files().len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CdnJsClient {
    http: Arc<RwLock<Option<Client>>>,
    base_url: Arc<Url>,
}

impl std::fmt::Debug for CdnJsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdnJsClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CdnJsClient {
    /// Create a client for the public cdnjs API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_API_URL)
    }

    /// Create a client from environment variables.
    ///
    /// Uses `CDNJS_API_URL` as the base URL when set, otherwise
    /// `https://api.cdnjs.com/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("CDNJS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::with_base_url(&base_url)
    }

    /// Create a client against another base URL, such as a mirror or mock server.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(CdnJsError::HttpError)?;

        Self::with_http_client(http, base_url)
    }

    /// Create a client that takes ownership of a caller-configured transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn with_http_client(http: Client, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        Ok(Self {
            http: Arc::new(RwLock::new(Some(http))),
            base_url: Arc::new(base_url),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Release the transport. Later calls fail with [`CdnJsError::Disposed`].
    pub async fn close(&self) {
        if self.http.write().await.take().is_some() {
            tracing::debug!(base_url = %self.base_url, "closed cdnjs client");
        }
    }

    /// Returns true once [`close`](Self::close) has been called.
    pub async fn is_closed(&self) -> bool {
        self.http.read().await.is_none()
    }

    /// List libraries in the catalog.
    ///
    /// Defaults to [`RequestOptions::minimal`] when `options` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the token is cancelled, or the
    /// client is closed.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn list_libraries(
        &self,
        options: Option<&RequestOptions>,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<LibraryMetadata>> {
        let query = match options {
            Some(options) => options.to_query_string(),
            None => RequestOptions::minimal().to_query_string(),
        };
        self.fetch_libraries(query, cancel).await
    }

    /// Search libraries in the catalog.
    ///
    /// Uses the same endpoint as [`list_libraries`](Self::list_libraries).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the token is cancelled, or the
    /// client is closed.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn search_libraries(
        &self,
        options: &SearchRequestOptions,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<LibraryMetadata>> {
        self.fetch_libraries(options.to_query_string(), cancel).await
    }

    async fn fetch_libraries(
        &self,
        query: String,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<LibraryMetadata>> {
        let path = format!("{LIBRARIES}{query}");
        let result: LibrarySearchResult = self.get_json(&path, cancel).await?;
        Ok(result.into_results())
    }

    /// Get the catalog entry for one library.
    ///
    /// Defaults to [`RequestOptions::minimal`] when `options` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CdnJsError::InvalidArgument`] without sending a request if
    /// `name` is empty, `.` or `..`, otherwise any request, cancellation, or
    /// disposal error.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn get_library(
        &self,
        name: &str,
        options: Option<&RequestOptions>,
        cancel: Option<&CancellationToken>,
    ) -> Result<LibraryMetadata> {
        require_segment("name", name)?;

        let query = match options {
            Some(options) => options.to_query_string(),
            None => RequestOptions::minimal().to_query_string(),
        };
        let path = format!("{LIBRARIES}/{}{query}", urlencoding::encode(name));

        self.get_json(&path, cancel).await
    }

    /// Get the files published for one version of a library.
    ///
    /// Unlike the other operations this defaults to
    /// [`RequestOptions::unspecified`], so the server returns its full asset
    /// listing when `options` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CdnJsError::InvalidArgument`] without sending a request if
    /// `name` or `version` is empty, `.` or `..`, otherwise any request,
    /// cancellation, or disposal error.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn get_library_assets(
        &self,
        name: &str,
        version: &str,
        options: Option<&RequestOptions>,
        cancel: Option<&CancellationToken>,
    ) -> Result<LibraryAssets> {
        require_segment("name", name)?;
        require_segment("version", version)?;

        let query = match options {
            Some(options) => options.to_query_string(),
            None => RequestOptions::unspecified().to_query_string(),
        };
        let path = format!(
            "{LIBRARIES}/{}/{}{query}",
            urlencoding::encode(name),
            urlencoding::encode(version)
        );

        self.get_json(&path, cancel).await
    }

    /// Issue a GET for `path` and decode the body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<T> {
        if cancel.is_some_and(CancellationToken::is_cancelled) {
            return Err(CdnJsError::Cancelled);
        }

        let http = self.http.read().await.clone().ok_or(CdnJsError::Disposed)?;
        let url = self.base_url.join(path)?;
        tracing::debug!(%url, "GET");

        let request = Self::send(http, url);

        match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(CdnJsError::Cancelled),
                result = request => result,
            },
            None => request.await,
        }
    }

    async fn send<T: DeserializeOwned>(http: Client, url: Url) -> Result<T> {
        let response = http.get(url).send().await.map_err(CdnJsError::HttpError)?;
        let response = Self::check_response(response).await?;
        let body = response.bytes().await.map_err(CdnJsError::HttpError)?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(CdnJsError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(CdnJsError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        // cdnjs reports errors as {"error": true, "status": 404, "message": "..."}
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return err.to_string();
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}

// Dot segments survive escaping and would be resolved away by `Url::join`.
fn require_segment(name: &'static str, value: &str) -> Result<()> {
    if value.is_empty() || value == "." || value == ".." {
        return Err(CdnJsError::InvalidArgument { name });
    }
    Ok(())
}
