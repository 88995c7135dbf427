//! Discriminated result values returned by the executor and the wrapper.
//!
//! # Design
//! Both results are enums so a match is exhaustive and no two payloads can be
//! present at once. Consumers that expect the object form
//! `{ data, error, exception }` get it through `Serialize`, where the absent
//! payloads are written as `null`.

use serde::{Serialize, Serializer};

use crate::error::FetchError;

/// Outcome of one HTTP request.
#[derive(Debug)]
pub enum FetchResult<T, E> {
    /// 2xx response, body decoded into `T`.
    Success(T),
    /// Non-2xx response, body decoded into `E`.
    Failure(E),
    /// No usable response.
    Exception(FetchError),
}

impl<T, E> FetchResult<T, E> {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, FetchResult::Failure(_))
    }

    pub fn is_exception(&self) -> bool {
        matches!(self, FetchResult::Exception(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchResult::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            FetchResult::Failure(error) => Some(error),
            _ => None,
        }
    }

    pub fn exception(&self) -> Option<&FetchError> {
        match self {
            FetchResult::Exception(exception) => Some(exception),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> FetchResult<U, E> {
        match self {
            FetchResult::Success(data) => FetchResult::Success(f(data)),
            FetchResult::Failure(error) => FetchResult::Failure(error),
            FetchResult::Exception(exception) => FetchResult::Exception(exception),
        }
    }

    /// Split into the transport outcome and, inside it, the application outcome.
    pub fn into_result(self) -> Result<Result<T, E>, FetchError> {
        match self {
            FetchResult::Success(data) => Ok(Ok(data)),
            FetchResult::Failure(error) => Ok(Err(error)),
            FetchResult::Exception(exception) => Err(exception),
        }
    }
}

#[derive(Serialize)]
struct FetchResultFields<'a, T, E> {
    data: Option<&'a T>,
    error: Option<&'a E>,
    exception: Option<&'a FetchError>,
}

impl<T: Serialize, E: Serialize> Serialize for FetchResult<T, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FetchResultFields {
            data: self.data(),
            error: self.error(),
            exception: self.exception(),
        }
        .serialize(serializer)
    }
}

/// Outcome of an arbitrary fallible future. `error` is never normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromiseResult<T, E> {
    Success(T),
    Failure(E),
}

impl<T, E> PromiseResult<T, E> {
    pub fn is_success(&self) -> bool {
        matches!(self, PromiseResult::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            PromiseResult::Success(data) => Some(data),
            PromiseResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            PromiseResult::Success(_) => None,
            PromiseResult::Failure(error) => Some(error),
        }
    }

    pub fn into_result(self) -> Result<T, E> {
        self.into()
    }
}

impl<T, E> From<Result<T, E>> for PromiseResult<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => PromiseResult::Success(data),
            Err(error) => PromiseResult::Failure(error),
        }
    }
}

impl<T, E> From<PromiseResult<T, E>> for Result<T, E> {
    fn from(result: PromiseResult<T, E>) -> Self {
        match result {
            PromiseResult::Success(data) => Ok(data),
            PromiseResult::Failure(error) => Err(error),
        }
    }
}

#[derive(Serialize)]
struct PromiseResultFields<'a, T, E> {
    data: Option<&'a T>,
    error: Option<&'a E>,
}

impl<T: Serialize, E: Serialize> Serialize for PromiseResult<T, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PromiseResultFields {
            data: self.data(),
            error: self.error(),
        }
        .serialize(serializer)
    }
}
