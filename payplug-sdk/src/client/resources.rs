//! Typed shortcuts over the documented PayPlug endpoints.

use reqwest::Method;
use serde::Serialize;

use super::Session;
use crate::error::Error;
use crate::objects::{AccountingReport, Page, Payment, Refund};

#[derive(Serialize)]
struct AbortPayment {
    aborted: bool,
}

impl Session {
    /// `POST /payments`. Unset fields of `payment` are left out of the body.
    pub async fn create_payment(&self, payment: &Payment) -> Result<Payment, Error> {
        let url = self.api_config().payments_url().map_err(Error::client)?;
        Ok(self.request(Method::POST, url, Some(payment)).await?.body)
    }

    /// `GET /payments/{payment_id}`
    pub async fn retrieve_payment(&self, payment_id: &str) -> Result<Payment, Error> {
        let url = self
            .api_config()
            .payment_url(payment_id)
            .map_err(Error::client)?;
        Ok(self.get(url).await?.body)
    }

    /// `GET /payments`, optionally paginated.
    pub async fn list_payments(
        &self,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<Page<Payment>, Error> {
        let mut url = self.api_config().payments_url().map_err(Error::client)?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(page) = page {
                query.append_pair("page", &page.to_string());
            }
            if let Some(per_page) = per_page {
                query.append_pair("per_page", &per_page.to_string());
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(self.get(url).await?.body)
    }

    /// Abort a payment that has not been paid yet.
    pub async fn abort_payment(&self, payment_id: &str) -> Result<Payment, Error> {
        let url = self
            .api_config()
            .payment_url(payment_id)
            .map_err(Error::client)?;
        let body = AbortPayment { aborted: true };
        Ok(self.request(Method::PATCH, url, Some(&body)).await?.body)
    }

    /// `POST /payments/{payment_id}/refunds`. Leave `amount` at zero to refund
    /// the full remaining amount.
    pub async fn create_refund(&self, payment_id: &str, refund: &Refund) -> Result<Refund, Error> {
        let url = self
            .api_config()
            .refunds_url(payment_id)
            .map_err(Error::client)?;
        Ok(self.request(Method::POST, url, Some(refund)).await?.body)
    }

    pub async fn retrieve_refund(&self, payment_id: &str, refund_id: &str) -> Result<Refund, Error> {
        let url = self
            .api_config()
            .refund_url(payment_id, refund_id)
            .map_err(Error::client)?;
        Ok(self.get(url).await?.body)
    }

    pub async fn list_refunds(&self, payment_id: &str) -> Result<Page<Refund>, Error> {
        let url = self
            .api_config()
            .refunds_url(payment_id)
            .map_err(Error::client)?;
        Ok(self.get(url).await?.body)
    }

    /// `POST /accounting_reports` with `start_date`, `end_date` and
    /// optionally `notification_url` set.
    pub async fn create_accounting_report(
        &self,
        report: &AccountingReport,
    ) -> Result<AccountingReport, Error> {
        let url = self
            .api_config()
            .accounting_reports_url()
            .map_err(Error::client)?;
        Ok(self.request(Method::POST, url, Some(report)).await?.body)
    }

    pub async fn retrieve_accounting_report(
        &self,
        report_id: &str,
    ) -> Result<AccountingReport, Error> {
        let url = self
            .api_config()
            .accounting_report_url(report_id)
            .map_err(Error::client)?;
        Ok(self.get(url).await?.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::error::ClientError;
    use crate::objects::{Currency, Metadata};
    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, Session) {
        let server = MockServer::start().await;
        let api = ApiConfig::new(&format!("{}/v1/", server.uri())).unwrap();
        let session = Session::new("sk_test_ok").with_api_config(api);
        (server, session)
    }

    #[tokio::test]
    async fn test_create_payment_posts_only_set_fields() {
        let (server, session) = setup().await;
        Mock::given(method("POST"))
            .and(path("/v1/payments"))
            .and(body_json(json!({
                "amount": 3300,
                "currency": "EUR",
                "authorization": null,
                "failure": null,
                "metadata": {"customer_id": 42},
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "pay_1",
                "object": "payment",
                "amount": 3300,
                "currency": "EUR",
                "hosted_payment": {"payment_url": "https://secure.payplug.com/pay/1"},
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut metadata = Metadata::new();
        metadata.insert("customer_id".into(), json!(42));
        let created = session
            .create_payment(&Payment {
                amount: 3300,
                currency: Some(Currency::Eur),
                metadata,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(created.id, "pay_1");
        assert!(created.hosted_payment.is_some());
    }

    #[tokio::test]
    async fn test_create_payment_with_bad_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payments"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"error": "unauthorized"})),
            )
            .mount(&server)
            .await;

        let api = ApiConfig::new(&format!("{}/v1", server.uri())).unwrap();
        let err = Session::new("sk_test_bad")
            .with_api_config(api)
            .create_payment(&Payment {
                amount: 3300,
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        let Error::Http(http) = err else {
            panic!("expected an HTTP error");
        };
        assert!(http.body().contains("unauthorized"));
        assert!(http.classification().contains("secret key"));
    }

    #[tokio::test]
    async fn test_list_payments_pagination() {
        let (server, session) = setup().await;
        Mock::given(method("GET"))
            .and(path("/v1/payments"))
            .and(query_param("page", "2"))
            .and(query_param("per_page", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "object": "list",
                "page": 2,
                "per_page": 10,
                "has_more": false,
                "data": [{"id": "pay_11"}, {"id": "pay_12"}],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = session.list_payments(Some(2), Some(10)).await.unwrap();

        assert_eq!(page.page, 2);
        assert!(!page.has_more);
        let ids: Vec<_> = page.data.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["pay_11", "pay_12"]);
    }

    #[tokio::test]
    async fn test_abort_payment_patches() {
        let (server, session) = setup().await;
        Mock::given(method("PATCH"))
            .and(path("/v1/payments/pay_1"))
            .and(body_json(json!({"aborted": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "pay_1",
                "failure": {"code": "aborted", "message": "The payment was aborted."},
            })))
            .expect(1)
            .mount(&server)
            .await;

        let payment = session.abort_payment("pay_1").await.unwrap();
        assert!(payment.failure.is_present());
    }

    #[tokio::test]
    async fn test_refund_endpoints_are_nested() {
        let (server, session) = setup().await;
        Mock::given(method("POST"))
            .and(path("/v1/payments/pay_1/refunds"))
            .and(body_json(json!({"amount": 358})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "re_1",
                "payment_id": "pay_1",
                "amount": 358,
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/payments/pay_1/refunds/re_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "re_1",
                "payment_id": "pay_1",
                "amount": 358,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let created = session
            .create_refund(
                "pay_1",
                &Refund {
                    amount: 358,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let fetched = session.retrieve_refund("pay_1", &created.id).await.unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_empty_identifier_is_rejected_locally() {
        let (server, session) = setup().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let err = session.retrieve_payment("").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Client {
                status: None,
                source: ClientError::Endpoint(_),
            }
        ));
    }

    #[tokio::test]
    async fn test_accounting_report_endpoints() {
        let (server, session) = setup().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounting_reports"))
            .and(body_json(json!({
                "start_date": "2020-01-01",
                "end_date": "2020-01-31",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "ar_1",
                "object": "accounting_report",
                "start_date": "2020-01-01",
                "end_date": "2020-01-31",
                "temporary_url": null,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let report = session
            .create_accounting_report(&AccountingReport {
                start_date: Some("2020-01-01".into()),
                end_date: Some("2020-01-31".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(report.id, "ar_1");
        assert_eq!(report.temporary_url, None);
    }
}
