//! The safe request executor.
//!
//! # Design
//! `SafeClient` holds only a transport, an optional `base_url` and a set of
//! default headers; nothing changes between calls. `execute` never returns
//! an error and never lets a transport panic through: every outcome is
//! reified into a `FetchResult`.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::http::{
    merge_headers, HttpMethod, HttpRequest, HttpResponse, RequestSpec, APPLICATION_JSON,
    CONTENT_TYPE,
};
use crate::result::FetchResult;
use crate::transport::Transport;

const LOG_TARGET: &str = "safe_fetch::http";

#[derive(Debug, Clone)]
pub struct SafeClient<T> {
    transport: T,
    base_url: Option<String>,
    default_headers: Vec<(String, String)>,
}

impl<T: Transport> SafeClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            base_url: None,
            default_headers: vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())],
        }
    }

    /// Prefix for request URLs that start with `/`.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.trim_end_matches('/').to_string());
        self
    }

    /// Header sent on every request unless the request overrides it.
    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers = merge_headers(&self.default_headers, &[(name.into(), value.into())]);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Assemble the request the transport will see, or the body encoding error.
    pub fn build_request(
        &self,
        spec: RequestSpec,
        method: HttpMethod,
    ) -> Result<HttpRequest, FetchError> {
        let (url, headers, body) = spec.into_parts();
        let body = body
            .transpose()
            .map_err(FetchError::Encode)?
            .map(|b| b.into_string());

        Ok(HttpRequest {
            method,
            url: self.resolve_url(url),
            headers: merge_headers(&self.default_headers, &headers),
            body,
        })
    }

    fn resolve_url(&self, url: String) -> String {
        match &self.base_url {
            Some(base) if url.starts_with('/') => format!("{base}{url}"),
            _ => url,
        }
    }

    /// Send one request and classify the outcome.
    ///
    /// 2xx decodes into `Success(D)`, anything else into `Failure(E)`.
    /// Body encoding, transport errors, transport panics and undecodable
    /// bodies all become `Exception`.
    pub async fn execute<D, E>(
        &self,
        spec: impl Into<RequestSpec>,
        method: HttpMethod,
    ) -> FetchResult<D, E>
    where
        D: DeserializeOwned,
        E: DeserializeOwned,
    {
        let request = match self.build_request(spec.into(), method) {
            Ok(request) => request,
            Err(err) => return exception(method, "<unsent>", err),
        };
        let url = request.url.clone();
        tracing::debug!(target: LOG_TARGET, method = %method, url = %url, "sending request");

        let sent = AssertUnwindSafe(self.transport.send(request))
            .catch_unwind()
            .await;
        let response = match sent {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => return exception(method, &url, FetchError::Transport(err)),
            Err(payload) => return exception(method, &url, FetchError::from_panic(payload)),
        };

        match classify(&response) {
            Ok(result) => {
                tracing::debug!(
                    target: LOG_TARGET,
                    method = %method,
                    url = %url,
                    status = response.status,
                    success = result.is_success(),
                    "response classified"
                );
                result
            }
            Err(err) => exception(method, &url, FetchError::Decode(err)),
        }
    }

    pub async fn get<D: DeserializeOwned, E: DeserializeOwned>(
        &self,
        spec: impl Into<RequestSpec>,
    ) -> FetchResult<D, E> {
        self.execute(spec, HttpMethod::Get).await
    }

    pub async fn post<D: DeserializeOwned, E: DeserializeOwned>(
        &self,
        spec: impl Into<RequestSpec>,
    ) -> FetchResult<D, E> {
        self.execute(spec, HttpMethod::Post).await
    }

    pub async fn put<D: DeserializeOwned, E: DeserializeOwned>(
        &self,
        spec: impl Into<RequestSpec>,
    ) -> FetchResult<D, E> {
        self.execute(spec, HttpMethod::Put).await
    }

    pub async fn patch<D: DeserializeOwned, E: DeserializeOwned>(
        &self,
        spec: impl Into<RequestSpec>,
    ) -> FetchResult<D, E> {
        self.execute(spec, HttpMethod::Patch).await
    }

    pub async fn del<D: DeserializeOwned, E: DeserializeOwned>(
        &self,
        spec: impl Into<RequestSpec>,
    ) -> FetchResult<D, E> {
        self.execute(spec, HttpMethod::Delete).await
    }
}

/// Decode the body into the payload type matching the status.
fn classify<D, E>(response: &HttpResponse) -> Result<FetchResult<D, E>, serde_json::Error>
where
    D: DeserializeOwned,
    E: DeserializeOwned,
{
    if response.is_ok() {
        response.json().map(FetchResult::Success)
    } else {
        response.json().map(FetchResult::Failure)
    }
}

fn exception<D, E>(method: HttpMethod, url: &str, err: FetchError) -> FetchResult<D, E> {
    tracing::debug!(target: LOG_TARGET, method = %method, url = %url, err = %err, "request failed");
    FetchResult::Exception(err)
}
