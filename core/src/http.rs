//! HTTP transport types.
//!
//! # Design
//! Every call is described by its own `HttpRequest` value: method, fully
//! joined URL, headers and body. Nothing about a request lives in shared
//! client state, so concurrent calls with different tokens cannot observe
//! each other's headers. `RequestData` makes the query-vs-body choice an
//! explicit tag set by the caller instead of something inferred at runtime.

use std::fmt;

use serde::Serialize;

use crate::error::PayError;

pub const AUTHORIZATION: &str = "authorization";
pub const CONTENT_TYPE: &str = "content-type";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How request data travels: nowhere, in the query string, or as a
/// form-encoded body. Both encoded variants hold an
/// `application/x-www-form-urlencoded` string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestData {
    #[default]
    Empty,
    Query(String),
    Form(String),
}

impl RequestData {
    /// Encode `value` for the query string.
    pub fn query<T: Serialize + ?Sized>(value: &T) -> Result<Self, PayError> {
        Ok(RequestData::Query(serde_urlencoded::to_string(value)?))
    }

    /// Encode `value` as a form body.
    pub fn form<T: Serialize + ?Sized>(value: &T) -> Result<Self, PayError> {
        Ok(RequestData::Form(serde_urlencoded::to_string(value)?))
    }
}

/// An HTTP request described as plain data.
///
/// Built by `Transport::build_request` and the `PaymentClient::build_*`
/// methods, executed by an `HttpExecutor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}
