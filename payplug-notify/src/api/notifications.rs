//! Notification handlers.
//!
//! PayPlug posts the changed resource to the merchant's `notification_url`.
//! The payload is untrusted: each handler re-fetches the resource it names and
//! answers with that verified copy.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use payplug_sdk::{AccountingReport, ClientError, Error, Payment, Refund};
use serde::Serialize;

use crate::state::AppState;

/// Build the notification router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/payments", post(payment_notification))
        .route("/refunds", post(refund_notification))
        .route("/accounting-reports", post(accounting_report_notification))
}

/// `POST /notifications/payments`
async fn payment_notification(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Payment>, NotificationApiError> {
    let payment = state.session.handle_payment_notification(body.as_ref()).await?;
    tracing::info!(
        payment_id = %payment.id,
        is_paid = payment.is_paid,
        "payment notification verified"
    );
    Ok(Json(payment))
}

/// `POST /notifications/refunds`
async fn refund_notification(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Refund>, NotificationApiError> {
    let refund = state.session.handle_refund_notification(body.as_ref()).await?;
    tracing::info!(
        refund_id = %refund.id,
        payment_id = %refund.payment_id,
        amount = refund.amount,
        "refund notification verified"
    );
    Ok(Json(refund))
}

/// `POST /notifications/accounting-reports`
async fn accounting_report_notification(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AccountingReport>, NotificationApiError> {
    let report = state
        .session
        .handle_accounting_report_notification(body.as_ref())
        .await?;
    tracing::info!(report_id = %report.id, "accounting report notification verified");
    Ok(Json(report))
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// A notification that could not be verified.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct NotificationApiError(#[from] Error);

impl NotificationApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            Error::NotificationTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            // Undecodable payload or one without a usable identifier.
            Error::UnexpectedApiResponse { status: None, .. }
            | Error::Client {
                status: None,
                source: ClientError::Endpoint(_) | ClientError::Read(_),
            } => StatusCode::BAD_REQUEST,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for NotificationApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self.0,
                upstream_status = ?self.0.status(),
                "notification verification failed"
            );
        } else {
            tracing::warn!(error = %self.0, "rejected notification payload");
        }
        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
