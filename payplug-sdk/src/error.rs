//! Error taxonomy shared by every SDK operation.
//!
//! The variants separate three situations callers usually need to tell apart:
//!
//! - the request never reached PayPlug ([`Error::Configuration`],
//!   [`Error::SecretKeyNotSet`], [`Error::Client`]),
//! - PayPlug rejected or failed the request ([`Error::Http`]),
//! - PayPlug answered with something that could not be understood
//!   ([`Error::UnexpectedApiResponse`]).

use std::fmt;

use reqwest::StatusCode;

use crate::config::EndpointError;

/// Errors produced by [`Session`](crate::Session) operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The session could not be configured; no request was attempted.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The secret key was empty when the request was built. Nothing was sent.
    #[error("payplug secret key is missing")]
    SecretKeyNotSet,

    /// Local failure unrelated to the content of PayPlug's answer.
    ///
    /// `status` is set when a response had already been received, e.g. when
    /// the connection dropped while reading the body.
    #[error("error during request: {source}")]
    Client {
        status: Option<StatusCode>,
        #[source]
        source: ClientError,
    },

    /// PayPlug answered with a status outside of `200..300`.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A response body or a notification payload was not the expected JSON.
    #[error("API response is not valid JSON: {source}")]
    UnexpectedApiResponse {
        status: Option<StatusCode>,
        #[source]
        source: serde_json::Error,
    },

    /// An inbound notification was larger than
    /// [`NOTIFICATION_MAX_SIZE`](crate::NOTIFICATION_MAX_SIZE).
    #[error("notification body exceeds the {limit} bytes limit")]
    NotificationTooLarge { limit: usize },
}

impl Error {
    /// The HTTP status received from PayPlug, if a response was received at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Client { status, .. } | Error::UnexpectedApiResponse { status, .. } => *status,
            Error::Http(err) => Some(err.status()),
            Error::Configuration(_) | Error::SecretKeyNotSet | Error::NotificationTooLarge { .. } => {
                None
            }
        }
    }

    pub(crate) fn client(source: impl Into<ClientError>) -> Self {
        Error::Client {
            status: None,
            source: source.into(),
        }
    }
}

/// Causes of [`Error::Client`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request body could not be serialized.
    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The request URL could not be built.
    #[error("invalid request url: {0}")]
    Endpoint(#[from] EndpointError),

    /// Transport-level failure (DNS, TLS, connection reset, timeout, …).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The notification stream could not be read.
    #[error("failed to read notification body: {0}")]
    Read(#[from] std::io::Error),
}

/// Causes of [`Error::Configuration`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to read CA bundle: {0}")]
    CaBundleRead(#[from] std::io::Error),

    #[error("invalid CA bundle: {0}")]
    CaBundle(#[source] reqwest::Error),

    #[error("CA bundle does not contain any certificate")]
    EmptyCaBundle,

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("invalid API base url: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("API base url `{0}` cannot carry resource paths")]
    NotABase(String),

    #[error("API base url `{0}` must not carry a query string or fragment")]
    BaseUrlSuffix(String),
}

/// A non-2xx answer from PayPlug.
///
/// Branch on [`HttpError::status`]; the [`classification`](HttpError::classification)
/// text is advisory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    status: StatusCode,
    body: String,
}

impl HttpError {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Numeric status code.
    pub fn code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Raw response body as sent by PayPlug.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn classification(&self) -> &'static str {
        classify_status(self.status)
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: the server gave the following response: `{}`.",
            self.classification(),
            self.body
        )
    }
}

impl std::error::Error for HttpError {}

/// Human-readable description of an HTTP status returned by PayPlug.
pub fn classify_status(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "bad request",
        401 => "unauthorized; please check your secret key",
        403 => "forbidden error; you are not allowed to access this resource",
        404 => "not found; the resource you requested does not exist",
        405 => "the requested method is not supported by this resource",
        500..=599 => "unexpected server error during the request",
        _ => "unhandled HTTP error",
    }
}
