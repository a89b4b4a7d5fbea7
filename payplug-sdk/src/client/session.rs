//! Authenticated request pipeline.
//!
//! Every call marshals the body, builds a bearer-authenticated request, sends
//! it, classifies the status and unmarshals the answer. Nothing is retried.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Certificate, Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::API_VERSION_HEADER;
use crate::config::ApiConfig;
use crate::error::{ClientError, ConfigurationError, Error, HttpError};

/// Decoded 2xx answer together with its status code.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub body: T,
}

/// Credential- and transport-bound handle through which all requests go.
///
/// Cloning is cheap and clones share the connection pool. Configure the
/// session (API version included) before issuing concurrent requests.
#[derive(Clone)]
pub struct Session {
    http: Client,
    api: ApiConfig,
    secret_key: String,
    api_version: Option<String>,
    timeout: Option<Duration>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("api", &self.api)
            .field("secret_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session trusting the system's default root certificates.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api: ApiConfig::default(),
            secret_key: secret_key.into(),
            api_version: None,
            timeout: None,
        }
    }

    /// Create a session that only trusts the certificates of a PEM CA bundle.
    pub fn from_ca_pem(secret_key: impl Into<String>, ca_pem: &[u8]) -> Result<Self, Error> {
        let http = client_with_roots(ca_pem)?;
        Ok(Self::new(secret_key).with_http_client(http))
    }

    /// Same as [`Session::from_ca_pem`], reading the bundle from `path`.
    pub fn from_ca_file(
        secret_key: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, Error> {
        let ca_pem = std::fs::read(path).map_err(ConfigurationError::CaBundleRead)?;
        Self::from_ca_pem(secret_key, &ca_pem)
    }

    /// Target another API location (sandbox, mock server, …).
    #[must_use]
    pub fn with_api_config(mut self, api: ApiConfig) -> Self {
        self.api = api;
        self
    }

    /// Pin the API version, as an ISO-8601 date (e.g. `2019-08-06`).
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.set_api_version(version);
        self
    }

    /// Pin the API version. An empty string removes the pin.
    pub fn set_api_version(&mut self, version: impl Into<String>) {
        let version = version.into();
        self.api_version = (!version.is_empty()).then_some(version);
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure a proxy).
    #[must_use]
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// Bound every request, from connection to the end of the body.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn api_config(&self) -> &ApiConfig {
        &self.api
    }

    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    /// Send `body` as JSON to `url` and decode the answer as `T`.
    ///
    /// `Ok` guarantees a status in `200..300` and a fully decoded body. On
    /// error, [`Error::status`] reports the status if a response was received.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(
            name = "payplug.request",
            skip_all,
            fields(method = %method, url = %url),
            err
        )
    )]
    pub async fn request<B, T>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<ApiResponse<T>, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        if self.secret_key.is_empty() {
            return Err(Error::SecretKeyNotSet);
        }

        let payload = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| Error::client(ClientError::Serialize(e)))?;

        let mut req = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, user_agent())
            .bearer_auth(&self.secret_key);
        if let Some(version) = &self.api_version {
            req = req.header(API_VERSION_HEADER, version);
        }
        if let Some(payload) = payload {
            req = req.body(payload);
        }
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let resp = req.send().await.map_err(Error::client)?;
        parse_response(resp).await
    }

    /// Like [`Session::request`], writing the decoded body into `target`.
    ///
    /// `target` is only touched when the whole exchange succeeded.
    pub async fn request_into<B, T>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        target: &mut T,
    ) -> Result<StatusCode, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let ApiResponse { status, body } = self.request(method, url, body).await?;
        *target = body;
        Ok(status)
    }

    /// `GET url` without a body.
    pub async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<ApiResponse<T>, Error> {
        self.request::<(), T>(Method::GET, url, None).await
    }
}

fn client_with_roots(ca_pem: &[u8]) -> Result<Client, ConfigurationError> {
    let certificates =
        Certificate::from_pem_bundle(ca_pem).map_err(ConfigurationError::CaBundle)?;
    if certificates.is_empty() {
        return Err(ConfigurationError::EmptyCaBundle);
    }

    certificates
        .into_iter()
        .fold(
            Client::builder().tls_built_in_root_certs(false),
            |builder, certificate| builder.add_root_certificate(certificate),
        )
        .build()
        .map_err(ConfigurationError::HttpClient)
}

fn user_agent() -> String {
    format!(
        "PayPlug-Rust/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

async fn parse_response<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<ApiResponse<T>, Error> {
    let status = resp.status();
    let bytes = resp.bytes().await.map_err(|e| Error::Client {
        status: Some(status),
        source: e.into(),
    })?;

    #[cfg(feature = "telemetry")]
    tracing::debug!(status = %status, length = bytes.len(), "payplug response received");

    if !status.is_success() {
        let body = String::from_utf8_lossy(&bytes).into_owned();
        return Err(HttpError::new(status, body).into());
    }

    let body = serde_json::from_slice(&bytes).map_err(|source| Error::UnexpectedApiResponse {
        status: Some(status),
        source,
    })?;
    Ok(ApiResponse { status, body })
}
