//! The normalized error carried by the `Exception` shape.
//!
//! # Design
//! Every way a request can fail to produce a usable response ends up here.
//! Errors that are already `std::error::Error` values keep their message and
//! stay reachable through `source()`. A panic payload is not an error value,
//! so it is stringified and wrapped in `Panicked`.

use std::any::Any;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Error currency for transports.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request body could not be serialized to JSON.
    #[error("{0}")]
    Encode(#[source] serde_json::Error),

    /// The transport failed to complete the round-trip.
    #[error("{0}")]
    Transport(#[source] BoxError),

    /// The transport panicked; holds the payload's string form.
    #[error("{0}")]
    Panicked(String),

    /// The response body was not valid JSON for the requested type.
    #[error("{0}")]
    Decode(#[source] serde_json::Error),
}

impl FetchError {
    /// Build a `Panicked` error from a payload caught by `catch_unwind`.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(s) => *s,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(s) => (*s).to_string(),
                Err(_) => "transport panicked with a non-string payload".to_string(),
            },
        };
        FetchError::Panicked(message)
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl Serialize for FetchError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FetchError", 1)?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}
