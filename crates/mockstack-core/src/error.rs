//! Error types shared by every simulated backend.
//!
//! [`BackendError`] is the outcome taxonomy a backend can return. None of its
//! variants is fatal: each one is rendered by the owning service's serializer
//! into that provider's error envelope. [`MockStackError`] covers failures of
//! the fixture machinery itself.

use crate::types::{ResourceKind, ServiceName};

/// Typed failure returned by a backend operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The addressed resource does not exist.
    #[error("{kind} not found: {key}")]
    NotFound {
        /// Kind of the missing resource.
        kind: ResourceKind,
        /// Name or id that was looked up.
        key: String,
    },

    /// A resource with the same name already exists in the partition.
    #[error("{kind} already exists: {key}")]
    AlreadyExists {
        /// Kind of the conflicting resource.
        kind: ResourceKind,
        /// The conflicting name or id.
        key: String,
    },

    /// The resource exists but is not in a state that permits the operation.
    #[error("precondition failed: {reason}")]
    PreconditionFailed {
        /// Kind of the resource the precondition applies to.
        kind: ResourceKind,
        /// What did not hold.
        reason: String,
    },

    /// A resource being created names another resource that does not exist.
    #[error("invalid reference to {kind}: {key}")]
    InvalidReference {
        /// Kind of the referenced resource.
        kind: ResourceKind,
        /// The dangling name or id.
        key: String,
    },
}

impl BackendError {
    /// Shorthand for [`BackendError::NotFound`].
    #[must_use]
    pub fn not_found(kind: ResourceKind, key: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            key: key.into(),
        }
    }

    /// Shorthand for [`BackendError::AlreadyExists`].
    #[must_use]
    pub fn already_exists(kind: ResourceKind, key: impl Into<String>) -> Self {
        Self::AlreadyExists {
            kind,
            key: key.into(),
        }
    }

    /// Shorthand for [`BackendError::InvalidReference`].
    #[must_use]
    pub fn invalid_reference(kind: ResourceKind, key: impl Into<String>) -> Self {
        Self::InvalidReference {
            kind,
            key: key.into(),
        }
    }

    /// Shorthand for [`BackendError::PreconditionFailed`].
    #[must_use]
    pub fn precondition_failed(kind: ResourceKind, reason: impl Into<String>) -> Self {
        Self::PreconditionFailed {
            kind,
            reason: reason.into(),
        }
    }

    /// The resource kind this error refers to.
    #[must_use]
    pub fn resource_kind(&self) -> ResourceKind {
        match self {
            Self::NotFound { kind, .. }
            | Self::AlreadyExists { kind, .. }
            | Self::PreconditionFailed { kind, .. }
            | Self::InvalidReference { kind, .. } => *kind,
        }
    }
}

/// Convenience result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// A call that reached a simulated service but names no mapped operation.
///
/// This has no provider-shaped rendering; the interceptor surfaces it as a
/// distinct fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{service} does not support {operation}")]
pub struct UnsupportedOperation {
    /// The service the call was routed to.
    pub service: ServiceName,
    /// Method and path, or action name, of the call.
    pub operation: String,
}

impl UnsupportedOperation {
    /// Create a new unsupported-operation fault.
    #[must_use]
    pub fn new(service: ServiceName, operation: impl Into<String>) -> Self {
        Self {
            service,
            operation: operation.into(),
        }
    }
}

/// Error type for the fixture infrastructure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MockStackError {
    /// An activation scope is already live on this mock.
    #[error("interception is already active")]
    AlreadyActive,
}

/// Convenience result type for infrastructure operations.
pub type MockStackResult<T> = Result<T, MockStackError>;
