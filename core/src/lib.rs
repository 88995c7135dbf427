//! Never-failing wrappers around HTTP requests and arbitrary futures.
//!
//! # Overview
//! `SafeClient::execute` sends one request through a [`Transport`] and
//! classifies the outcome into a [`FetchResult`]: `Success` for a 2xx
//! response, `Failure` for any other status, `Exception` when no usable
//! response was obtained. [`wrap`] does the same for any
//! `Future<Output = Result<T, E>>`, yielding a two-shape [`PromiseResult`].
//!
//! # Design
//! - Nothing here returns `Err` or lets a transport panic escape.
//! - `execute` normalizes every failure into [`FetchError`]; `wrap` passes the
//!   operation's error through untouched.
//! - The transport is a trait so tests and hosts can bring their own I/O.
//!   `ReqwestTransport` is the default.
//! - The free functions below build a fresh client per call, so no state is
//!   shared between invocations.

pub mod client;
pub mod error;
pub mod http;
pub mod result;
pub mod transport;
pub mod wrap;

pub use client::SafeClient;
pub use error::{BoxError, FetchError};
pub use http::{Body, HttpMethod, HttpRequest, HttpResponse, RequestSpec};
pub use result::{FetchResult, PromiseResult};
pub use transport::Transport;
pub use wrap::wrap;

#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod default_client {
    use serde::de::DeserializeOwned;

    use crate::{FetchResult, HttpMethod, RequestSpec, ReqwestTransport, SafeClient};

    fn client() -> SafeClient<ReqwestTransport> {
        SafeClient::new(ReqwestTransport::default())
    }

    pub async fn execute<D: DeserializeOwned, E: DeserializeOwned>(
        spec: impl Into<RequestSpec>,
        method: HttpMethod,
    ) -> FetchResult<D, E> {
        client().execute(spec, method).await
    }

    pub async fn get<D: DeserializeOwned, E: DeserializeOwned>(
        spec: impl Into<RequestSpec>,
    ) -> FetchResult<D, E> {
        execute(spec, HttpMethod::Get).await
    }

    pub async fn post<D: DeserializeOwned, E: DeserializeOwned>(
        spec: impl Into<RequestSpec>,
    ) -> FetchResult<D, E> {
        execute(spec, HttpMethod::Post).await
    }

    pub async fn put<D: DeserializeOwned, E: DeserializeOwned>(
        spec: impl Into<RequestSpec>,
    ) -> FetchResult<D, E> {
        execute(spec, HttpMethod::Put).await
    }

    pub async fn patch<D: DeserializeOwned, E: DeserializeOwned>(
        spec: impl Into<RequestSpec>,
    ) -> FetchResult<D, E> {
        execute(spec, HttpMethod::Patch).await
    }

    pub async fn del<D: DeserializeOwned, E: DeserializeOwned>(
        spec: impl Into<RequestSpec>,
    ) -> FetchResult<D, E> {
        execute(spec, HttpMethod::Delete).await
    }
}

#[cfg(feature = "reqwest")]
pub use default_client::{del, execute, get, patch, post, put};
