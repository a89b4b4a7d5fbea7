//! Accounting reports.

use serde::{Deserialize, Serialize};
use url::Url;

use super::{Timestamp, Verifiable, is_false, null_as_default};
use crate::config::{ApiConfig, EndpointError};

/// An accounting report covering every operation between two dates (UTC).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingReport {
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Always `accounting_report`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub is_live: bool,
    /// Download URL, set once the file is available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporary_url: Option<String>,
    /// Files stay available for 24 hours after their creation.
    #[serde(default, skip_serializing_if = "Timestamp::is_unset")]
    pub file_available_until: Timestamp,
    /// ISO 8601 date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// ISO 8601 date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<String>,
}

impl Verifiable for AccountingReport {
    fn verification_url(&self, api: &ApiConfig) -> Result<Url, EndpointError> {
        api.accounting_report_url(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accounting_report_round_trip() {
        let report: AccountingReport = serde_json::from_str(
            r#"
            {
                "id": "ar_1GjZ8ZlLfr8fBNB4Gu2nD5",
                "object": "accounting_report",
                "is_live": false,
                "temporary_url": null,
                "file_available_until": null,
                "start_date": "2020-01-01",
                "end_date": "2020-01-31",
                "notification_url": "https://example.net/notifications?id=42"
            }"#,
        )
        .unwrap();

        assert!(report.file_available_until.is_unset());
        assert_eq!(report.start_date.as_deref(), Some("2020-01-01"));

        let decoded: AccountingReport =
            serde_json::from_str(&serde_json::to_string(&report).unwrap()).unwrap();
        assert_eq!(decoded, report);
        assert_eq!(
            report
                .verification_url(&ApiConfig::default())
                .unwrap()
                .as_str(),
            "https://api.payplug.com/v1/accounting_reports/ar_1GjZ8ZlLfr8fBNB4Gu2nD5"
        );
    }
}
