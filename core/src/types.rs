//! Domain DTOs for the payment API.
//!
//! # Design
//! Only request-side types are modelled. Users and payments returned by the
//! API are passed through as `serde_json::Value`, so schema changes on the
//! server never break deserialization here. The mock-server defines its own
//! copies of these shapes; integration tests catch drift between the two.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Login credentials, sent as a form body to `/authenticate`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Bearer token issued by `/authenticate`.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Pull the `authToken` field out of a login payload.
    pub fn from_login_payload(payload: &Value) -> Option<Self> {
        payload
            .get("authToken")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AuthToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Request payload for `POST /payments`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub payee_id: String,
    pub payer_id: String,
    pub payment_system: String,
    pub payment_method: String,
    pub amount: f64,
    pub currency: String,
    pub comment: String,
}
