//! Notification (IPN) verification.
//!
//! PayPlug notifications are not signed. A payload only tells *which*
//! resource changed; its content is then fetched again from the API with the
//! session's credentials, and only that fetched copy is returned.

use tokio::io::{AsyncRead, AsyncReadExt};

use super::Session;
use crate::error::Error;
use crate::objects::{AccountingReport, Payment, Refund, Verifiable};

/// Largest notification body accepted, in bytes.
pub const NOTIFICATION_MAX_SIZE: usize = 1_000_000;

impl Session {
    /// Parse a notification body and return the trusted resource it refers to.
    ///
    /// Only the identifying fields of the payload are used; every other field
    /// is replaced by what the API returns.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(name = "payplug.notification", skip_all, err)
    )]
    pub async fn handle_notification<T, R>(&self, body: R) -> Result<T, Error>
    where
        T: Verifiable,
        R: AsyncRead + Unpin,
    {
        let mut raw = Vec::new();
        body.take(NOTIFICATION_MAX_SIZE as u64 + 1)
            .read_to_end(&mut raw)
            .await
            .map_err(Error::client)?;
        if raw.len() > NOTIFICATION_MAX_SIZE {
            return Err(Error::NotificationTooLarge {
                limit: NOTIFICATION_MAX_SIZE,
            });
        }

        let untrusted: T = serde_json::from_slice(&raw)
            .map_err(|source| Error::UnexpectedApiResponse { status: None, source })?;
        let url = untrusted
            .verification_url(self.api_config())
            .map_err(Error::client)?;

        #[cfg(feature = "telemetry")]
        tracing::debug!(url = %url, "verifying notification");

        Ok(self.get(url).await?.body)
    }

    pub async fn handle_payment_notification<R>(&self, body: R) -> Result<Payment, Error>
    where
        R: AsyncRead + Unpin,
    {
        self.handle_notification(body).await
    }

    pub async fn handle_refund_notification<R>(&self, body: R) -> Result<Refund, Error>
    where
        R: AsyncRead + Unpin,
    {
        self.handle_notification(body).await
    }

    pub async fn handle_accounting_report_notification<R>(
        &self,
        body: R,
    ) -> Result<AccountingReport, Error>
    where
        R: AsyncRead + Unpin,
    {
        self.handle_notification(body).await
    }
}
