//! Rust SDK for the [PayPlug](https://www.payplug.com) payment API.
//!
//! A [`Session`] holds the secret key and the HTTP transport. It sends
//! authenticated JSON requests and decodes the answers into typed resources
//! ([`Payment`], [`Refund`], [`AccountingReport`]).
//!
//! Notifications received on a merchant's `notification_url` are not signed,
//! so [`Session::handle_notification`] never trusts their content: it re-fetches
//! the referenced resource from the API and returns that copy.
//!
//! ```no_run
//! # async fn run() -> Result<(), payplug_sdk::Error> {
//! use payplug_sdk::{Currency, Payment, Session};
//!
//! let session = Session::new("sk_test_...");
//! let payment = session
//!     .create_payment(&Payment {
//!         amount: 3300,
//!         currency: Some(Currency::Eur),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{:?}", payment.hosted_payment);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod objects;

pub use client::{API_VERSION_HEADER, ApiResponse, NOTIFICATION_MAX_SIZE, Session};
pub use config::{ApiConfig, EndpointError};
pub use error::{ClientError, ConfigurationError, Error, HttpError};
pub use objects::{
    AccountingReport, Currency, Metadata, Nullable, Page, Payment, Refund, Timestamp, Verifiable,
};
