//! Faults raised by the interceptor itself.

use mockstack_core::UnsupportedOperation;

/// A call the interceptor could not hand to a simulated service.
#[derive(Debug, thiserror::Error)]
pub enum InterceptError {
    /// The host names no simulated provider endpoint.
    #[error("no simulated endpoint for host {host}")]
    NotIntercepted {
        /// The host the call was addressed to.
        host: String,
    },

    /// The endpoint matched but the call names no mapped operation.
    #[error(transparent)]
    Unsupported(#[from] UnsupportedOperation),

    /// The request carries neither a URI authority nor a `Host` header.
    #[error("request has no host")]
    MissingHost,
}
