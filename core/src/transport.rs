//! Request building, execution and response classification.
//!
//! # Design
//! `Transport` owns the base URL and turns `(method, path, data, token)` into
//! an `HttpRequest`. Executing it is delegated to an `HttpExecutor`, so the
//! building and classification halves stay free of I/O and can be tested
//! with canned responses. `ReqwestExecutor` is the default executor.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::error::PayError;
use crate::http::{
    HttpMethod, HttpRequest, HttpResponse, RequestData, AUTHORIZATION, CONTENT_TYPE, FORM_URLENCODED,
};

/// Performs the network round trip for a single request.
///
/// Implementations must return responses of every status as `Ok`; status
/// interpretation belongs to [`classify`].
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, PayError>;
}

/// `HttpExecutor` backed by a `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestExecutor {
    client: reqwest::Client,
}

impl ReqwestExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client, e.g. one with a timeout.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, PayError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
        };

        let mut builder = self.client.request(method, request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();
        let body = response.text().await?;

        Ok(HttpResponse { status, headers, body })
    }
}

/// Builds and sends requests relative to a fixed base URL.
#[derive(Debug, Clone)]
pub struct Transport<E = ReqwestExecutor> {
    base_url: Url,
    executor: E,
}

impl Transport<ReqwestExecutor> {
    pub fn new(base_url: &str) -> Result<Self, PayError> {
        Self::with_executor(base_url, ReqwestExecutor::default())
    }
}

impl<E> Transport<E> {
    /// Rejects anything that is not an absolute `http`/`https` URL with a
    /// host. A query or fragment on the base would leak into every request.
    pub fn with_executor(base_url: &str, executor: E) -> Result<Self, PayError> {
        let parsed = Url::parse(base_url).map_err(|e| PayError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host().is_none() || parsed.cannot_be_a_base() {
            return Err(PayError::InvalidBaseUrl(base_url.to_string()));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(PayError::InvalidBaseUrl(format!("{base_url}: query and fragment are not allowed")));
        }
        Ok(Self {
            base_url: parsed,
            executor,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Join `path` onto the base URL, dropping empty segments and ending
    /// with a trailing slash. Joining an already joined URL is a no-op.
    pub fn join(&self, path: &str) -> Result<Url, PayError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| PayError::InvalidBaseUrl(self.base_url.to_string()))?;
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|s| !s.is_empty()))
                .push("");
        }
        Ok(url)
    }

    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        data: RequestData,
        token: Option<&str>,
    ) -> Result<HttpRequest, PayError> {
        let mut url = self.join(path)?;
        let mut headers = Vec::new();
        let mut body = None;

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            headers.push((AUTHORIZATION.to_string(), format!("Bearer {token}")));
        }

        match data {
            RequestData::Empty => {}
            RequestData::Query(query) => {
                if !query.is_empty() {
                    url.set_query(Some(&query));
                }
            }
            RequestData::Form(form) => {
                headers.push((CONTENT_TYPE.to_string(), FORM_URLENCODED.to_string()));
                body = Some(form);
            }
        }

        Ok(HttpRequest {
            method,
            url: url.into(),
            headers,
            body,
        })
    }
}

impl<E: HttpExecutor> Transport<E> {
    /// Execute a prepared request and classify its response.
    pub async fn dispatch(&self, request: HttpRequest) -> Result<Value, PayError> {
        debug!(method = %request.method, url = %request.url, "dispatching request");
        let response = self.executor.execute(request).await?;
        classify(response)
    }

    pub async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        data: RequestData,
        token: Option<&str>,
    ) -> Result<Value, PayError> {
        let request = self.build_request(method, path, data, token)?;
        self.dispatch(request).await
    }
}

/// Map a response onto the payload callers see.
///
/// - status >= 400: `PayError::Remote` with the body as message
/// - 200 and 201: the body
/// - anything else: an empty object
pub fn classify(response: HttpResponse) -> Result<Value, PayError> {
    debug!(status = response.status, "classifying response");
    if response.status >= 400 {
        return Err(PayError::Remote {
            status: response.status,
            message: parse_body(response.body),
        });
    }
    if (200..=201).contains(&response.status) {
        return Ok(parse_body(response.body));
    }
    Ok(Value::Object(Map::new()))
}

/// JSON bodies are parsed, anything else is kept as a string.
fn parse_body(body: String) -> Value {
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}
