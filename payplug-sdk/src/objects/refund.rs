//! Refunds of a payment.

use serde::{Deserialize, Serialize};
use url::Url;

use super::{Currency, Metadata, Timestamp, Verifiable, is_false, is_zero, null_as_default};
use crate::config::{ApiConfig, EndpointError};

/// A (possibly partial) refund of a payment.
///
/// Refunds live under their payment, so verifying one requires both `id` and
/// `payment_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Refund {
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub payment_id: String,
    /// Always `refund`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub is_live: bool,
    /// Amount in cents, at least 10.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub amount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Timestamp::is_unset")]
    pub created_at: Timestamp,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl Verifiable for Refund {
    fn verification_url(&self, api: &ApiConfig) -> Result<Url, EndpointError> {
        api.refund_url(&self.payment_id, &self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_api_refund() {
        let refund: Refund = serde_json::from_str(
            r#"
            {
                "id": "re_3NxGqPfSGMHQgLSZH0Mv3B",
                "payment_id": "pay_5iHMDxy4ABR4YBVW4UscIn",
                "object": "refund",
                "is_live": true,
                "amount": 358,
                "currency": "EUR",
                "created_at": 1434012358,
                "metadata": {
                    "customer_id": 42,
                    "reason": "The delivery was delayed"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(refund.amount, 358);
        assert_eq!(refund.created_at, Timestamp(1434012358));
        assert_eq!(refund.metadata["customer_id"], json!(42));
        assert_eq!(refund.metadata["reason"], json!("The delivery was delayed"));

        let decoded: Refund =
            serde_json::from_str(&serde_json::to_string(&refund).unwrap()).unwrap();
        assert_eq!(decoded, refund);
    }

    #[test]
    fn test_verification_url_is_nested_under_payment() {
        let refund = Refund {
            id: "re_1".into(),
            payment_id: "pay_1".into(),
            ..Default::default()
        };
        assert_eq!(
            refund
                .verification_url(&ApiConfig::default())
                .unwrap()
                .as_str(),
            "https://api.payplug.com/v1/payments/pay_1/refunds/re_1"
        );

        let orphan = Refund {
            id: "re_1".into(),
            ..Default::default()
        };
        assert!(orphan.verification_url(&ApiConfig::default()).is_err());
    }
}
