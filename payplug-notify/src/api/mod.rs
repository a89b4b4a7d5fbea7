//! HTTP handlers.
//!
//! # Endpoints
//!
//! - `POST /notifications/payments`           – verify a payment notification
//! - `POST /notifications/refunds`            – verify a refund notification
//! - `POST /notifications/accounting-reports` – verify an accounting report notification

pub mod notifications;
