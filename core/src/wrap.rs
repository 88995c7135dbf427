//! The safe operation wrapper.
//!
//! Unlike `SafeClient::execute`, the error is handed back exactly as the
//! operation produced it; there is no normalization step and no panic
//! capture.

use std::future::Future;

use crate::result::PromiseResult;

/// Await `operation` and reify its outcome.
pub async fn wrap<F, T, E>(operation: F) -> PromiseResult<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    operation.await.into()
}
