//! The successful response payload: an unconsumed blob of preview content.

use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use tokio::io::AsyncRead;
use tokio_util::io::StreamReader;

use crate::Error;

/// The payload of a successful preview, thumbnail, or upload call.
///
/// Wraps the response body as an opaque, unread byte stream together with
/// the length and MIME type the service reported. The transport connection
/// backing the stream stays open until this value is consumed or dropped,
/// so content is never truncated under the caller; every failure path
/// releases its connection before returning instead.
///
/// A `BlobResponse` is consumed exactly once, through one of
/// [`into_stream`](Self::into_stream),
/// [`into_async_read`](Self::into_async_read), or [`bytes`](Self::bytes).
#[derive(Debug)]
pub struct BlobResponse {
    response: reqwest::Response,
}

impl BlobResponse {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        Self { response }
    }

    /// Content length reported by the service, when the transport knows it.
    #[must_use]
    pub fn length(&self) -> Option<u64> {
        self.response.content_length()
    }

    /// MIME type reported by the service's `Content-Type` header.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    /// Consume the payload as a stream of byte chunks.
    pub fn into_stream(self) -> impl Stream<Item = Result<Bytes, Error>> + Send {
        self.response.bytes_stream().map_err(Error::transport)
    }

    /// Consume the payload as an [`AsyncRead`] over the content.
    pub fn into_async_read(self) -> impl AsyncRead + Send {
        StreamReader::new(
            self.response
                .bytes_stream()
                .map_err(std::io::Error::other),
        )
    }

    /// Buffer the entire payload into memory.
    pub async fn bytes(self) -> Result<Bytes, Error> {
        self.response.bytes().await.map_err(Error::transport)
    }
}
