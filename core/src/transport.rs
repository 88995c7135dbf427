//! The network seam.
//!
//! A `Transport` performs exactly one round-trip per `send`. It reports an
//! error only when no response was obtained; 4xx and 5xx responses are
//! returned as data for the client to classify.

use async_trait::async_trait;

use crate::error::BoxError;
use crate::http::{HttpRequest, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, BoxError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for &T {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        (**self).send(request).await
    }
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use super::*;
    use crate::http::HttpMethod;

    /// `Transport` backed by a caller-configured `reqwest::Client`.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
            let mut builder = self
                .client
                .request(to_reqwest_method(request.method), &request.url);
            for (name, value) in request.headers {
                builder = builder.header(name, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response.text().await?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn methods_map_one_to_one() {
            assert_eq!(to_reqwest_method(HttpMethod::Get), reqwest::Method::GET);
            assert_eq!(to_reqwest_method(HttpMethod::Patch), reqwest::Method::PATCH);
            assert_eq!(to_reqwest_method(HttpMethod::Delete), reqwest::Method::DELETE);
        }
    }
}
