//! The payment resource and its nested objects.

use serde::{Deserialize, Serialize};
use url::Url;

use super::{Metadata, Nullable, Timestamp, Verifiable, is_false, is_zero, null_as_default};
use crate::config::{ApiConfig, EndpointError};

/// Currency code (three-letter ISO 4217).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "EUR")]
    Eur,
    #[serde(untagged)]
    Other(String),
}

/// Credit card brand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Brand {
    Mastercard,
    Maestro,
    Visa,
    #[serde(rename = "CB")]
    Cb,
    #[serde(untagged)]
    Other(String),
}

/// How the goods of a payment are delivered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryType {
    /// Ship to the cardholder's billing address.
    Billing,
    /// Ship to another verified address on file with the merchant.
    Verified,
    /// Ship to an address different from the billing address.
    New,
    /// Pick-up at a local store.
    ShipToStore,
    /// Online services, gift cards, redemption codes.
    DigitalGoods,
    /// Travel and event tickets, not shipped.
    TravelOrEvent,
    Other,
    #[serde(untagged)]
    Unknown(String),
}

/// Why a payment failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCode {
    ProcessingError,
    CardDeclined,
    InsufficientFunds,
    #[serde(rename = "3ds_declined")]
    Declined3ds,
    IncorrectNumber,
    FraudSuspected,
    MethodUnsupported,
    CardSchemeMismatch,
    CardExpirationDatePriorToLastInstallmentDate,
    /// Aborted through the "abort a payment" endpoint.
    Aborted,
    /// The customer left the payment page without trying to pay.
    Timeout,
    #[serde(untagged)]
    Other(String),
}

/// Authorization of a deferred payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub authorized_amount: u64,
    #[serde(default, skip_serializing_if = "Timestamp::is_unset")]
    pub authorized_at: Timestamp,
    #[serde(default, skip_serializing_if = "Timestamp::is_unset")]
    pub expires_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<FailureCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Card used for a payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    #[serde(
        default,
        rename = "last4",
        alias = "last_4",
        skip_serializing_if = "Option::is_none"
    )]
    pub last4: Option<String>,
    /// Two-letter ISO 3166 country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp_year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp_month: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<Brand>,
    /// Set when the payment saved the card or was created with a saved card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Customer billing information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Billing {
    /// `mr`, `mrs` or `miss`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// E.164 format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_phone_number: Option<String>,
    /// E.164 format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landline_phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Two-letter ISO 3166 country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Two-letter ISO 639-1 language code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Recipient shipping information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landline_phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_type: Option<DeliveryType>,
}

/// Hosted payment page details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedPayment {
    /// Where the customer should be redirected to pay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_by: Option<String>,
}

/// Delivery state of the notifications sent for a payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Status code returned by the merchant's notification page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_code: Option<u16>,
}

/// Oney payment method details, only set for Oney payments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// `oney_x3_with_fees` or `oney_x4_with_fees`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Oney is still analyzing the payer's file.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub is_pending: bool,
}

/// A PayPlug payment.
///
/// The same type is used as the body of a creation request: unset fields are
/// left out of the JSON, except `authorization` and `failure` which are
/// always written (as `null` when absent).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Always `payment`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub is_live: bool,
    /// Amount in cents.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub amount: u64,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub amount_refunded: u64,
    /// Set for deferred payments.
    #[serde(default)]
    pub authorization: Nullable<Authorization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment_plan_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub is_paid: bool,
    #[serde(default, skip_serializing_if = "Timestamp::is_unset")]
    pub paid_at: Timestamp,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub is_refunded: bool,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub is_3ds: bool,
    /// Saving the card was mandatory on the payment page.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub save_card: bool,
    /// Saving the card was offered to the customer.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub allow_save_card: bool,
    #[serde(default, skip_serializing_if = "Timestamp::is_unset")]
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Timestamp::is_unset")]
    pub refundable_after: Timestamp,
    #[serde(default, skip_serializing_if = "Timestamp::is_unset")]
    pub refundable_until: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<CardDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<Billing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Shipping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosted_payment: Option<HostedPayment>,
    /// Set for unsuccessful payments.
    #[serde(default)]
    pub failure: Nullable<Failure>,
    /// Shown to the customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationState>,
}

impl Verifiable for Payment {
    fn verification_url(&self, api: &ApiConfig) -> Result<Url, EndpointError> {
        api.payment_url(&self.id)
    }
}
