//! Glimpse HTTP Client
//!
//! A native Rust client for the Glimpse preview service REST API. The
//! service renders previews and thumbnails of images, PDFs, and documents;
//! this crate shapes the requests and classifies the responses — all
//! rendering happens server-side.
//!
//! # Quick Start
//!
//! ```no_run
//! use glimpse_client::{PreviewClient, Query, Shape};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), glimpse_client::Error> {
//!     let client = PreviewClient::at_url("http://127.0.0.1:10000");
//!
//!     let query = Query::builder()
//!         .account_id("account-1")
//!         .node_id("node-1")
//!         .version(1)
//!         .preview_area("800x600")
//!         .shape(Shape::Rounded)
//!         .build();
//!
//!     let blob = client.get_preview_of_image(&query).await?;
//!     println!(
//!         "{} bytes of {}",
//!         blob.length().unwrap_or(0),
//!         blob.mime_type().unwrap_or("unknown"),
//!     );
//!
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! Use the builder for a custom timeout or a preconfigured transport:
//!
//! ```no_run
//! use std::time::Duration;
//! use glimpse_client::PreviewClient;
//!
//! let client = PreviewClient::builder("http://127.0.0.1:10000")
//!     .timeout(Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//! ```

mod blob;
mod error;

pub use blob::BlobResponse;
pub use error::Error;

// Re-export the core types so callers don't need a direct `glimpse-core`
// dependency.
pub use glimpse_core::{ImageFormat, Quality, Query, QueryBuilder, ServiceType, Shape, UnknownVariant};

use std::time::Duration;

use reqwest::{Client, StatusCode, multipart};
use tracing::debug;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the identity value on GET requests.
const ACCOUNT_ID_HEADER: &str = "AccountId";

const PREVIEW_PATH: &str = "/preview";
const HEALTH_LIVE_PATH: &str = "/health/live/";
const HEALTH_READY_PATH: &str = "/health/ready/";
const THUMBNAIL_SEGMENT: &str = "thumbnail";

/// HTTP client for the Glimpse preview service.
///
/// Stateless and cheap to clone; a single instance may serve any number of
/// concurrent calls, each on its own connection. One attempt is made per
/// call — retry policy belongs to the caller.
#[derive(Debug, Clone)]
pub struct PreviewClient {
    client: Client,
    service_url: String,
    preview_url: String,
}

/// Builder for configuring a [`PreviewClient`].
#[derive(Debug)]
pub struct PreviewClientBuilder {
    service_url: String,
    timeout: Duration,
    client: Option<Client>,
}

impl PreviewClientBuilder {
    /// Create a new builder with the given base URL.
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            client: None,
        }
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a custom reqwest Client.
    ///
    /// Useful for configuring TLS, proxies, or other advanced settings.
    #[must_use]
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<PreviewClient, Error> {
        let client = match self.client {
            Some(c) => c,
            None => Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(|e| Error::Configuration(e.to_string()))?,
        };

        let preview_url = format!("{}{PREVIEW_PATH}", self.service_url);
        Ok(PreviewClient {
            client,
            service_url: self.service_url,
            preview_url,
        })
    }
}

impl PreviewClient {
    /// Create a client from a full base URL, e.g. `http://127.0.0.1:10000`.
    pub fn at_url(service_url: impl Into<String>) -> Self {
        PreviewClientBuilder::new(service_url)
            .build()
            .expect("default client configuration should not fail")
    }

    /// Create a client from protocol, domain, and port.
    pub fn at_host(protocol: &str, domain: &str, port: u16) -> Self {
        Self::at_url(format!("{protocol}://{domain}:{port}"))
    }

    /// Create a builder for advanced configuration.
    pub fn builder(service_url: impl Into<String>) -> PreviewClientBuilder {
        PreviewClientBuilder::new(service_url)
    }

    /// Get the base service URL.
    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    // =========================================================================
    // Generic operations
    // =========================================================================

    /// Request the preview of an already-stored item with an HTTP GET.
    ///
    /// # Panics
    ///
    /// Panics if `query` has no account id: sending a preview GET without an
    /// identity is a caller contract violation, not a recoverable outcome.
    pub async fn preview(&self, kind: ServiceType, query: &Query) -> Result<BlobResponse, Error> {
        self.send_get(&query.to_string(), kind, require_account_id(query))
            .await
    }

    /// Request the thumbnail of an already-stored item with an HTTP GET.
    ///
    /// # Panics
    ///
    /// Panics if `query` has no account id, as for [`preview`](Self::preview).
    pub async fn thumbnail(&self, kind: ServiceType, query: &Query) -> Result<BlobResponse, Error> {
        self.send_get(
            &thumbnail_path(&query.to_string()),
            kind,
            require_account_id(query),
        )
        .await
    }

    /// Send an item's content for processing with an HTTP POST and receive
    /// its preview back.
    ///
    /// The content travels as a single multipart part named `file`, declared
    /// `application/octet-stream`, carrying `file_name`. There is no
    /// client-side size limit; streamed bodies transfer chunked.
    pub async fn upload_preview(
        &self,
        kind: ServiceType,
        blob: impl Into<reqwest::Body>,
        query: &Query,
        file_name: impl Into<String>,
    ) -> Result<BlobResponse, Error> {
        self.send_post(&query.to_string(), kind, blob.into(), file_name.into())
            .await
    }

    /// Send an item's content for processing with an HTTP POST and receive
    /// its thumbnail back.
    pub async fn upload_thumbnail(
        &self,
        kind: ServiceType,
        blob: impl Into<reqwest::Body>,
        query: &Query,
        file_name: impl Into<String>,
    ) -> Result<BlobResponse, Error> {
        self.send_post(
            &thumbnail_path(&query.to_string()),
            kind,
            blob.into(),
            file_name.into(),
        )
        .await
    }

    // =========================================================================
    // Image
    // =========================================================================

    /// GET the preview of a stored image.
    pub async fn get_preview_of_image(&self, query: &Query) -> Result<BlobResponse, Error> {
        self.preview(ServiceType::Image, query).await
    }

    /// GET the thumbnail of a stored image.
    pub async fn get_thumbnail_of_image(&self, query: &Query) -> Result<BlobResponse, Error> {
        self.thumbnail(ServiceType::Image, query).await
    }

    /// POST an image and receive its preview back.
    pub async fn post_preview_of_image(
        &self,
        blob: impl Into<reqwest::Body>,
        query: &Query,
        file_name: impl Into<String>,
    ) -> Result<BlobResponse, Error> {
        self.upload_preview(ServiceType::Image, blob, query, file_name)
            .await
    }

    /// POST an image and receive its thumbnail back.
    pub async fn post_thumbnail_of_image(
        &self,
        blob: impl Into<reqwest::Body>,
        query: &Query,
        file_name: impl Into<String>,
    ) -> Result<BlobResponse, Error> {
        self.upload_thumbnail(ServiceType::Image, blob, query, file_name)
            .await
    }

    // =========================================================================
    // Pdf
    // =========================================================================

    /// GET the preview of a stored PDF.
    pub async fn get_preview_of_pdf(&self, query: &Query) -> Result<BlobResponse, Error> {
        self.preview(ServiceType::Pdf, query).await
    }

    /// GET the thumbnail of a stored PDF.
    pub async fn get_thumbnail_of_pdf(&self, query: &Query) -> Result<BlobResponse, Error> {
        self.thumbnail(ServiceType::Pdf, query).await
    }

    /// POST a PDF and receive its preview back.
    pub async fn post_preview_of_pdf(
        &self,
        blob: impl Into<reqwest::Body>,
        query: &Query,
        file_name: impl Into<String>,
    ) -> Result<BlobResponse, Error> {
        self.upload_preview(ServiceType::Pdf, blob, query, file_name)
            .await
    }

    /// POST a PDF and receive its thumbnail back.
    pub async fn post_thumbnail_of_pdf(
        &self,
        blob: impl Into<reqwest::Body>,
        query: &Query,
        file_name: impl Into<String>,
    ) -> Result<BlobResponse, Error> {
        self.upload_thumbnail(ServiceType::Pdf, blob, query, file_name)
            .await
    }

    // =========================================================================
    // Document
    // =========================================================================

    /// GET the preview of a stored document.
    pub async fn get_preview_of_document(&self, query: &Query) -> Result<BlobResponse, Error> {
        self.preview(ServiceType::Document, query).await
    }

    /// GET the thumbnail of a stored document.
    pub async fn get_thumbnail_of_document(&self, query: &Query) -> Result<BlobResponse, Error> {
        self.thumbnail(ServiceType::Document, query).await
    }

    /// POST a document and receive its preview back.
    pub async fn post_preview_of_document(
        &self,
        blob: impl Into<reqwest::Body>,
        query: &Query,
        file_name: impl Into<String>,
    ) -> Result<BlobResponse, Error> {
        self.upload_preview(ServiceType::Document, blob, query, file_name)
            .await
    }

    /// POST a document and receive its thumbnail back.
    pub async fn post_thumbnail_of_document(
        &self,
        blob: impl Into<reqwest::Body>,
        query: &Query,
        file_name: impl Into<String>,
    ) -> Result<BlobResponse, Error> {
        self.upload_thumbnail(ServiceType::Document, blob, query, file_name)
            .await
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Check whether the service process is alive.
    ///
    /// Returns `true` iff `GET {base}/health/live/` answers exactly 200;
    /// `false` on any other status or any transport failure. Never errors.
    pub async fn health_live(&self) -> bool {
        self.check_health(HEALTH_LIVE_PATH).await
    }

    /// Check whether the service is ready to accept requests.
    ///
    /// Returns `true` iff `GET {base}/health/ready/` answers exactly 200;
    /// `false` on any other status or any transport failure. Never errors.
    pub async fn health_ready(&self) -> bool {
        self.check_health(HEALTH_READY_PATH).await
    }

    async fn check_health(&self, endpoint: &str) -> bool {
        let url = format!("{}{endpoint}", self.service_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status() == StatusCode::OK,
            Err(error) => {
                debug!(%url, %error, "health check failed");
                false
            }
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    async fn send_get(
        &self,
        path: &str,
        kind: ServiceType,
        account_id: &str,
    ) -> Result<BlobResponse, Error> {
        let url = format!("{}/{}{path}", self.preview_url, kind.as_str());
        debug!(%url, "sending preview GET");

        let response = self
            .client
            .get(&url)
            .header(ACCOUNT_ID_HEADER, account_id)
            .send()
            .await
            .map_err(Error::transport)?;
        classify(response)
    }

    async fn send_post(
        &self,
        path: &str,
        kind: ServiceType,
        blob: reqwest::Body,
        file_name: String,
    ) -> Result<BlobResponse, Error> {
        let url = format!("{}/{}{path}", self.preview_url, kind.as_str());
        debug!(%url, %file_name, "sending preview POST");

        let part = multipart::Part::stream(blob)
            .file_name(file_name)
            .mime_str("application/octet-stream")
            .expect("application/octet-stream is a valid MIME type");
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(Error::transport)?;
        classify(response)
    }
}

/// Map a response status onto the documented outcome set.
///
/// The success arm hands the unread response to [`BlobResponse`], keeping
/// its connection open for the caller; every error arm drops the response,
/// releasing the connection before returning.
fn classify(response: reqwest::Response) -> Result<BlobResponse, Error> {
    match response.status() {
        StatusCode::OK => Ok(BlobResponse::new(response)),
        StatusCode::NOT_FOUND => Err(Error::ItemNotFound),
        StatusCode::UNPROCESSABLE_ENTITY => Err(Error::ValidationError),
        StatusCode::BAD_REQUEST => Err(Error::BadRequest),
        status => Err(Error::unexpected_status(status.as_u16())),
    }
}

fn require_account_id(query: &Query) -> &str {
    query
        .account_id()
        .expect("an account id must be set on the query for preview GET requests")
}

/// Rewrite an already-serialized query into its thumbnail variant.
///
/// Pure string transform; never re-runs descriptor field logic. `/thumbnail`
/// is spliced in before the query string when one exists, appended with a
/// trailing `/` when none does.
fn thumbnail_path(serialized: &str) -> String {
    // More than 1 because an empty descriptor serializes to just "/".
    if serialized.matches('/').count() > 1 {
        match serialized.find('?') {
            Some(index) => format!(
                "{}/{THUMBNAIL_SEGMENT}{}",
                &serialized[..index - 1],
                &serialized[index - 1..]
            ),
            None => format!("{serialized}/{THUMBNAIL_SEGMENT}/"),
        }
    } else {
        format!("/{THUMBNAIL_SEGMENT}/")
    }
}
