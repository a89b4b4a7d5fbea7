//! API location and endpoint templates.
//!
//! Everything that used to be a process-wide constant (host, API version,
//! resource paths) is derived from a single [`ApiConfig`] value owned by each
//! [`Session`](crate::Session), so tests can point a session at a mock server.

use std::borrow::Cow;

use url::Url;

use crate::error::ConfigurationError;

/// Production API host.
pub const API_BASE_URL: &str = "https://api.payplug.com";

/// Path version of the PayPlug API (`/v1`).
pub const API_VERSION: &str = "1";

/// Errors raised while deriving a resource URL.
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error(transparent)]
    Parse(#[from] url::ParseError),

    #[error("`{name}` is not a valid path segment: {value:?}")]
    InvalidSegment { name: &'static str, value: String },
}

/// Immutable description of where the PayPlug API lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Versioned base URL, always ending with `/`.
    base_url: Url,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_host(API_BASE_URL, API_VERSION).expect("valid default API base url")
    }
}

impl ApiConfig {
    /// Use `base_url` (e.g. `https://api.payplug.com/v1`) as the versioned API root.
    ///
    /// Trailing slashes are normalized. A query string or fragment is rejected
    /// since endpoints are resolved relative to the path.
    pub fn new(base_url: &str) -> Result<Self, ConfigurationError> {
        let mut base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigurationError::NotABase(base_url.into()));
        }
        if base_url.query().is_some() || base_url.fragment().is_some() {
            return Err(ConfigurationError::BaseUrlSuffix(base_url.into()));
        }
        let path = format!("{}/", base_url.path().trim_end_matches('/'));
        base_url.set_path(&path);
        Ok(Self { base_url })
    }

    /// Build the versioned root from a host and a path version: `{host}/v{version}`.
    pub fn from_host(host: &str, version: &str) -> Result<Self, ConfigurationError> {
        Self::new(&format!("{}/v{version}", host.trim_end_matches('/')))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `payments`
    pub fn payments_url(&self) -> Result<Url, EndpointError> {
        self.endpoint("payments")
    }

    /// `payments/{payment_id}`
    pub fn payment_url(&self, payment_id: &str) -> Result<Url, EndpointError> {
        self.endpoint(&format!("payments/{}", segment("payment_id", payment_id)?))
    }

    /// `payments/{payment_id}/refunds`
    pub fn refunds_url(&self, payment_id: &str) -> Result<Url, EndpointError> {
        self.endpoint(&format!(
            "payments/{}/refunds",
            segment("payment_id", payment_id)?
        ))
    }

    /// `payments/{payment_id}/refunds/{refund_id}`
    pub fn refund_url(&self, payment_id: &str, refund_id: &str) -> Result<Url, EndpointError> {
        self.endpoint(&format!(
            "payments/{}/refunds/{}",
            segment("payment_id", payment_id)?,
            segment("refund_id", refund_id)?
        ))
    }

    /// `customers`
    pub fn customers_url(&self) -> Result<Url, EndpointError> {
        self.endpoint("customers")
    }

    /// `customers/{customer_id}/cards`
    pub fn cards_url(&self, customer_id: &str) -> Result<Url, EndpointError> {
        self.endpoint(&format!(
            "customers/{}/cards",
            segment("customer_id", customer_id)?
        ))
    }

    /// `accounting_reports`
    pub fn accounting_reports_url(&self) -> Result<Url, EndpointError> {
        self.endpoint("accounting_reports")
    }

    /// `accounting_reports/{report_id}`
    pub fn accounting_report_url(&self, report_id: &str) -> Result<Url, EndpointError> {
        self.endpoint(&format!(
            "accounting_reports/{}",
            segment("report_id", report_id)?
        ))
    }

    fn endpoint(&self, path: &str) -> Result<Url, EndpointError> {
        Ok(self.base_url.join(path)?)
    }
}

/// Percent-encode a server-assigned identifier so it stays a single path segment.
fn segment<'a>(name: &'static str, value: &'a str) -> Result<Cow<'a, str>, EndpointError> {
    if matches!(value, "" | "." | "..") {
        return Err(EndpointError::InvalidSegment {
            name,
            value: value.to_owned(),
        });
    }
    Ok(urlencoding::encode(value))
}
