//! HTTP request and response types exchanged with a [`Transport`].
//!
//! # Design
//! Requests and responses are plain data. `SafeClient` assembles an
//! `HttpRequest` from a caller's `RequestSpec` and hands it to the transport,
//! which answers with an `HttpResponse` whose body has already been read.
//! Status interpretation stays in the client; a transport only reports
//! whether the round-trip itself completed.
//!
//! [`Transport`]: crate::transport::Transport

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub const CONTENT_TYPE: &str = "content-type";
pub const APPLICATION_JSON: &str = "application/json";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// JSON-encoded payload.
    Json(String),
    /// Raw text, sent as-is.
    Text(String),
}

impl Body {
    pub fn into_string(self) -> String {
        match self {
            Body::Json(s) | Body::Text(s) => s,
        }
    }
}

/// What the caller wants sent: a target URL, extra headers and an optional body.
///
/// Body encoding failures are kept until execution so the executor can
/// report them through the `Exception` shape instead of failing here.
#[derive(Debug)]
pub struct RequestSpec {
    url: String,
    headers: Vec<(String, String)>,
    body: Option<Result<Body, serde_json::Error>>,
}

impl RequestSpec {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Serialize `body` to a JSON string and send it as the request body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.body = Some(serde_json::to_string(body).map(Body::Json));
        self
    }

    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(Ok(Body::Text(body.into())));
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub(crate) fn into_parts(
        self,
    ) -> (String, Vec<(String, String)>, Option<Result<Body, serde_json::Error>>) {
        (self.url, self.headers, self.body)
    }
}

impl From<&str> for RequestSpec {
    fn from(url: &str) -> Self {
        RequestSpec::new(url)
    }
}

impl From<String> for RequestSpec {
    fn from(url: String) -> Self {
        RequestSpec::new(url)
    }
}

/// A fully assembled request, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// A completed response with its body already read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// True for any 2xx status.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Layer `overrides` on top of `base`. Names compare case-insensitively; an
/// override replaces the base entry in place and keeps its own spelling.
pub fn merge_headers(
    base: &[(String, String)],
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    let mut merged = base.to_vec();
    for (name, value) in overrides {
        match merged
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(entry) => *entry = (name.clone(), value.clone()),
            None => merged.push((name.clone(), value.clone())),
        }
    }
    merged
}
