use thiserror::Error;

/// Failure outcome of a preview, thumbnail, or upload call.
///
/// Every variant is a recoverable, typed value returned to the caller —
/// nothing in this taxonomy is thrown across the public boundary. The
/// mapping from HTTP status codes is exact: 400, 404, and 422 get their own
/// variants; every other status, and any transport failure that prevents a
/// status from being obtained at all, collapses into
/// [`InternalServerError`](Error::InternalServerError).
#[derive(Debug, Error)]
pub enum Error {
    /// The service rejected the query parameters as malformed (HTTP 400).
    #[error("the preview service rejected the request as malformed")]
    BadRequest,

    /// The referenced node or version does not exist or is not accessible
    /// (HTTP 404).
    #[error("the requested item was not found")]
    ItemNotFound,

    /// The parameter combination was semantically invalid, e.g. a bad crop
    /// or area syntax (HTTP 422).
    #[error("the preview service rejected the request parameters")]
    ValidationError,

    /// Any other status code, or a transport failure before a status was
    /// obtained.
    ///
    /// `source` is present only for transport failures; for unexpected
    /// status codes the error is cause-less and `status` records the code.
    #[error("preview service failure")]
    InternalServerError {
        /// The unexpected status code, when one was received.
        status: Option<u16>,
        /// The underlying transport error, when one occurred.
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The client itself could not be constructed.
    #[error("client configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// A transport failure that prevented any status from being obtained.
    pub(crate) fn transport(source: reqwest::Error) -> Self {
        Self::InternalServerError {
            status: None,
            source: Some(source),
        }
    }

    /// A status code outside the documented contract.
    pub(crate) fn unexpected_status(status: u16) -> Self {
        Self::InternalServerError {
            status: Some(status),
            source: None,
        }
    }

    /// The unexpected status code carried by
    /// [`InternalServerError`](Error::InternalServerError), if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::InternalServerError { status, .. } => *status,
            _ => None,
        }
    }
}
