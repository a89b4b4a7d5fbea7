//! Typed PayPlug resources and their JSON mappings.

pub mod accounting_report;
pub mod nullable;
pub mod payment;
pub mod refund;

pub use accounting_report::AccountingReport;
pub use nullable::Nullable;
pub use payment::{
    Authorization, Billing, Brand, CardDetails, Currency, DeliveryType, Failure, FailureCode,
    HostedPayment, NotificationState, Payment, PaymentMethod, Shipping,
};
pub use refund::Refund;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

use crate::config::{ApiConfig, EndpointError};

/// Custom key/value pairs attached by the merchant when creating an object.
///
/// Values are kept as raw JSON so numbers and strings round-trip untouched.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A resource that knows where to fetch its authoritative state.
///
/// Anything deserialized from an inbound notification is untrusted; the
/// verification URL only depends on identifying fields so it can be computed
/// from such an untrusted value.
pub trait Verifiable: DeserializeOwned {
    fn verification_url(&self, api: &ApiConfig) -> Result<Url, EndpointError>;
}

/// Seconds since the Unix epoch. Zero means "not set".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const UNSET: Timestamp = Timestamp(0);

    pub fn is_unset(&self) -> bool {
        self.0 == 0
    }

    /// Calendar date-time, or `None` when unset or out of range.
    pub fn to_datetime(self) -> Option<time::OffsetDateTime> {
        if self.is_unset() {
            return None;
        }
        let seconds = i64::try_from(self.0).ok()?;
        time::OffsetDateTime::from_unix_timestamp(seconds).ok()
    }
}

impl From<u64> for Timestamp {
    fn from(seconds: u64) -> Self {
        Timestamp(seconds)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_unset() {
            serializer.serialize_none()
        } else {
            serializer.serialize_u64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<u64>::deserialize(deserializer).map(|seconds| Timestamp(seconds.unwrap_or(0)))
    }
}

/// One page of a collection endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub page: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub per_page: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_more: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<T>,
}

/// Deserialize `null` as the type's default value, like an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

pub(crate) fn is_zero(value: &u64) -> bool {
    *value == 0
}
