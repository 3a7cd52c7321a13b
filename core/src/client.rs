//! Client facade for the payment API.
//!
//! # Design
//! `PaymentClient` holds only a `Transport` (base URL plus executor) and
//! carries no mutable state between calls. Each operation is split into a
//! `build_*` method that validates its inputs and produces an `HttpRequest`,
//! and an async method that builds, dispatches and classifies. Hosts that do
//! their own I/O can use the `build_*` half with `transport::classify`.
//! A request that fails validation is never handed to the executor.

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{PayError, ValidationCode};
use crate::http::{HttpMethod, HttpRequest, RequestData};
use crate::transport::{HttpExecutor, ReqwestExecutor, Transport};
use crate::types::{Credentials, PaymentRequest};

/// Stateless client for the payment API.
#[derive(Debug, Clone)]
pub struct PaymentClient<E = ReqwestExecutor> {
    transport: Transport<E>,
}

impl PaymentClient<ReqwestExecutor> {
    /// Fails if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, PayError> {
        Self::with_executor(base_url, ReqwestExecutor::default())
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, PayError> {
        Self::new(&config.base_url)
    }
}

impl<E> PaymentClient<E> {
    pub fn with_executor(base_url: &str, executor: E) -> Result<Self, PayError> {
        Ok(Self {
            transport: Transport::with_executor(base_url, executor)?,
        })
    }

    pub fn transport(&self) -> &Transport<E> {
        &self.transport
    }

    pub fn build_user_login(&self, credentials: &Credentials) -> Result<HttpRequest, PayError> {
        if credentials.username.is_empty() || credentials.password.is_empty() {
            return Err(PayError::validation(ValidationCode::Authentication, "username or password"));
        }
        let data = RequestData::form(credentials)?;
        self.transport.build_request(HttpMethod::Post, "/authenticate", data, None)
    }

    pub fn build_get_all_users(&self, token: &str) -> Result<HttpRequest, PayError> {
        self.transport
            .build_request(HttpMethod::Get, "users", RequestData::Empty, Some(token))
    }

    pub fn build_get_payments(&self, token: &str) -> Result<HttpRequest, PayError> {
        self.transport
            .build_request(HttpMethod::Get, "payments", RequestData::Empty, Some(token))
    }

    pub fn build_find_one_payment(&self, id: &str, token: &str) -> Result<HttpRequest, PayError> {
        require_id(id)?;
        require(token, "payment token")?;
        self.transport
            .build_request(HttpMethod::Get, &format!("payment/{id}"), RequestData::Empty, Some(token))
    }

    pub fn build_approve_payment(&self, id: &str, token: &str) -> Result<HttpRequest, PayError> {
        require_id(id)?;
        require(token, "payment token")?;
        self.transport.build_request(
            HttpMethod::Put,
            &format!("payments/{id}/approve"),
            RequestData::Empty,
            Some(token),
        )
    }

    /// Only the id is required here; an empty token sends no `Authorization`
    /// header and leaves the rejection to the server.
    pub fn build_cancel_payment(&self, id: &str, token: &str) -> Result<HttpRequest, PayError> {
        require_id(id)?;
        self.transport.build_request(
            HttpMethod::Put,
            &format!("payments/{id}/cancel"),
            RequestData::Empty,
            Some(token),
        )
    }

    pub fn build_create_payment(&self, payment: &PaymentRequest, token: &str) -> Result<HttpRequest, PayError> {
        let data = RequestData::form(payment)?;
        self.transport.build_request(HttpMethod::Post, "payments", data, Some(token))
    }
}

impl<E: HttpExecutor> PaymentClient<E> {
    /// Exchange credentials for a login payload carrying `authToken`.
    pub async fn user_login(&self, credentials: &Credentials) -> Result<Value, PayError> {
        let request = self.build_user_login(credentials)?;
        self.transport.dispatch(request).await
    }

    pub async fn get_all_users(&self, token: &str) -> Result<Value, PayError> {
        let request = self.build_get_all_users(token)?;
        self.transport.dispatch(request).await
    }

    pub async fn get_payments(&self, token: &str) -> Result<Value, PayError> {
        let request = self.build_get_payments(token)?;
        self.transport.dispatch(request).await
    }

    pub async fn find_one_payment(&self, id: &str, token: &str) -> Result<Value, PayError> {
        let request = self.build_find_one_payment(id, token)?;
        self.transport.dispatch(request).await
    }

    /// Resolves to an empty object on success.
    pub async fn approve_payment(&self, id: &str, token: &str) -> Result<Value, PayError> {
        let request = self.build_approve_payment(id, token)?;
        self.transport.dispatch(request).await
    }

    /// Resolves to an empty object on success.
    pub async fn cancel_payment(&self, id: &str, token: &str) -> Result<Value, PayError> {
        let request = self.build_cancel_payment(id, token)?;
        self.transport.dispatch(request).await
    }

    pub async fn create_payment(&self, payment: &PaymentRequest, token: &str) -> Result<Value, PayError> {
        let request = self.build_create_payment(payment, token)?;
        self.transport.dispatch(request).await
    }
}

/// Ids are joined as one path segment; `.`, `..` and `/` would change
/// which endpoint the request reaches.
fn require_id(id: &str) -> Result<(), PayError> {
    require(id, "payment id")?;
    if matches!(id, "." | "..") || id.contains('/') {
        return Err(PayError::Validation {
            code: ValidationCode::BadRequest,
            message: "The payment id is invalid!".to_string(),
        });
    }
    Ok(())
}

fn require(value: &str, subject: &str) -> Result<(), PayError> {
    if value.is_empty() {
        return Err(PayError::validation(ValidationCode::BadRequest, subject));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{AUTHORIZATION, CONTENT_TYPE, FORM_URLENCODED};

    fn client() -> PaymentClient {
        PaymentClient::new("http://localhost:3000").unwrap()
    }

    fn payment() -> PaymentRequest {
        PaymentRequest {
            payee_id: "fc1941f3-7912-4b3d-8fdb-dcb9733aa999".to_string(),
            payer_id: "0499274e-9325-43b1-9cff-57c957e9a333".to_string(),
            payment_system: "ingenico".to_string(),
            payment_method: "mastercard".to_string(),
            amount: 1000.42,
            currency: "EUR".to_string(),
            comment: "Salary for April".to_string(),
        }
    }

    #[test]
    fn build_user_login_produces_form_request() {
        let req = client()
            .build_user_login(&Credentials::new("serious_business", "suchPassw0rdSecure"))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/authenticate/");
        assert_eq!(req.header(CONTENT_TYPE), Some(FORM_URLENCODED));
        assert!(req.header(AUTHORIZATION).is_none());
        assert_eq!(
            req.body.as_deref(),
            Some("username=serious_business&password=suchPassw0rdSecure")
        );
    }

    #[test]
    fn build_user_login_requires_both_fields() {
        for creds in [Credentials::new("", "x"), Credentials::new("x", "")] {
            let err = client().build_user_login(&creds).unwrap_err();
            assert_eq!(err.code(), Some(ValidationCode::Authentication));
        }
    }

    #[test]
    fn build_get_all_users_produces_correct_request() {
        let req = client().build_get_all_users("tok").unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/users/");
        assert_eq!(req.header(AUTHORIZATION), Some("Bearer tok"));
        assert!(req.body.is_none());
    }

    #[test]
    fn build_get_payments_produces_correct_request() {
        let req = client().build_get_payments("tok").unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/payments/");
    }

    #[test]
    fn build_find_one_payment_uses_singular_path() {
        let req = client().build_find_one_payment("p1", "tok").unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/payment/p1/");
    }

    #[test]
    fn build_find_one_payment_requires_token() {
        let err = client().build_find_one_payment("p1", "").unwrap_err();
        match err {
            PayError::Validation { code, message } => {
                assert_eq!(code, ValidationCode::BadRequest);
                assert_eq!(message, "The payment token is missing!");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn build_approve_payment_produces_correct_request() {
        let req = client().build_approve_payment("42", "tok").unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:3000/payments/42/approve/");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_approve_payment_requires_id_and_token() {
        assert_eq!(client().build_approve_payment("", "tok").unwrap_err().status(), Some(400));
        assert_eq!(client().build_approve_payment("42", "").unwrap_err().status(), Some(400));
    }

    #[test]
    fn build_cancel_payment_requires_only_id() {
        let err = client().build_cancel_payment("", "tok").unwrap_err();
        assert_eq!(err.to_string(), "400: The payment id is missing!");

        let req = client().build_cancel_payment("42", "").unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:3000/payments/42/cancel/");
        assert!(req.header(AUTHORIZATION).is_none());
    }

    #[test]
    fn ids_that_leave_their_segment_are_rejected() {
        let c = client();
        for id in [".", "..", "a/b", "/"] {
            for err in [
                c.build_find_one_payment(id, "tok").unwrap_err(),
                c.build_approve_payment(id, "tok").unwrap_err(),
                c.build_cancel_payment(id, "tok").unwrap_err(),
            ] {
                assert_eq!(err.to_string(), "400: The payment id is invalid!", "{id}");
            }
        }
    }

    #[test]
    fn dotted_and_encoded_ids_stay_in_one_segment() {
        let req = client().build_approve_payment("a.b", "tok").unwrap();
        assert_eq!(req.url, "http://localhost:3000/payments/a.b/approve/");
        let req = client().build_find_one_payment("%2e%2e", "tok").unwrap();
        assert_eq!(req.url, "http://localhost:3000/payment/%252e%252e/");
    }

    #[test]
    fn build_create_payment_encodes_form() {
        let req = client().build_create_payment(&payment(), "tok").unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/payments/");
        assert_eq!(req.header(CONTENT_TYPE), Some(FORM_URLENCODED));
        let form: Vec<(String, String)> = serde_urlencoded::from_str(req.body.as_deref().unwrap()).unwrap();
        assert!(form.contains(&("amount".to_string(), "1000.42".to_string())));
        assert!(form.contains(&("comment".to_string(), "Salary for April".to_string())));
    }

    #[test]
    fn invalid_base_url_rejected_at_construction() {
        assert!(matches!(PaymentClient::new("not a url"), Err(PayError::InvalidBaseUrl(_))));
    }

    #[test]
    fn from_config_uses_base_url() {
        let client = PaymentClient::from_config(&ClientConfig::new("https://api.example.com/v2")).unwrap();
        assert_eq!(client.transport().base_url().as_str(), "https://api.example.com/v2");
    }
}
