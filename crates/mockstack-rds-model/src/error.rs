//! RDS wire error model.
//!
//! RDS errors render as a query-protocol `ErrorResponse` envelope whose
//! `Type` is `Sender` for client faults and `Receiver` for server faults.

use std::fmt;

use mockstack_core::{BackendError, ResourceKind};

/// RDS error codes the simulation can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum RdsErrorCode {
    /// The DB instance does not exist.
    DBInstanceNotFound,
    /// A DB instance with the identifier already exists.
    DBInstanceAlreadyExists,
    /// The DB security group does not exist.
    DBSecurityGroupNotFound,
    /// A DB security group with the name already exists.
    DBSecurityGroupAlreadyExists,
    /// The DB subnet group does not exist.
    DBSubnetGroupNotFoundFault,
    /// A DB subnet group with the name already exists.
    DBSubnetGroupAlreadyExists,
    /// A subnet named in a subnet group does not exist.
    InvalidSubnetIdNotFound,
    /// A required parameter is absent.
    MissingParameter,
    /// A parameter value is malformed.
    InvalidParameterValue,
    /// An unexpected server-side failure.
    #[default]
    InternalFailure,
}

impl RdsErrorCode {
    /// Returns the wire `Code` string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DBInstanceNotFound => "DBInstanceNotFound",
            Self::DBInstanceAlreadyExists => "DBInstanceAlreadyExists",
            Self::DBSecurityGroupNotFound => "DBSecurityGroupNotFound",
            Self::DBSecurityGroupAlreadyExists => "DBSecurityGroupAlreadyExists",
            Self::DBSubnetGroupNotFoundFault => "DBSubnetGroupNotFoundFault",
            Self::DBSubnetGroupAlreadyExists => "DBSubnetGroupAlreadyExists",
            Self::InvalidSubnetIdNotFound => "InvalidSubnetID.NotFound",
            Self::MissingParameter => "MissingParameter",
            Self::InvalidParameterValue => "InvalidParameterValue",
            Self::InternalFailure => "InternalFailure",
        }
    }

    /// Returns the default HTTP status code for this error.
    #[must_use]
    pub fn default_status_code(&self) -> http::StatusCode {
        match self {
            Self::DBInstanceNotFound
            | Self::DBSecurityGroupNotFound
            | Self::DBSubnetGroupNotFoundFault => http::StatusCode::NOT_FOUND,
            Self::InternalFailure => http::StatusCode::INTERNAL_SERVER_ERROR,
            _ => http::StatusCode::BAD_REQUEST,
        }
    }

    /// The envelope `Type`: who is at fault.
    #[must_use]
    pub fn fault_type(&self) -> &'static str {
        match self {
            Self::InternalFailure => "Receiver",
            _ => "Sender",
        }
    }

    fn not_found(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::DbInstance => Self::DBInstanceNotFound,
            ResourceKind::DbSecurityGroup => Self::DBSecurityGroupNotFound,
            ResourceKind::DbSubnetGroup => Self::DBSubnetGroupNotFoundFault,
            ResourceKind::Subnet => Self::InvalidSubnetIdNotFound,
            ResourceKind::Bucket | ResourceKind::Object => Self::InternalFailure,
        }
    }

    fn already_exists(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::DbInstance => Self::DBInstanceAlreadyExists,
            ResourceKind::DbSecurityGroup => Self::DBSecurityGroupAlreadyExists,
            ResourceKind::DbSubnetGroup => Self::DBSubnetGroupAlreadyExists,
            ResourceKind::Subnet | ResourceKind::Bucket | ResourceKind::Object => {
                Self::InternalFailure
            }
        }
    }
}

impl fmt::Display for RdsErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An RDS error response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdsError {
    /// The error code.
    pub code: RdsErrorCode,
    /// A human-readable error message.
    pub message: String,
    /// The HTTP status code.
    pub status_code: http::StatusCode,
}

impl fmt::Display for RdsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RdsError({}): {}", self.code, self.message)
    }
}

impl std::error::Error for RdsError {}

impl RdsError {
    /// Create a new `RdsError` with a message.
    #[must_use]
    pub fn with_message(code: RdsErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: message.into(),
            code,
        }
    }

    /// A required parameter is absent.
    #[must_use]
    pub fn missing_parameter(name: &str) -> Self {
        Self::with_message(
            RdsErrorCode::MissingParameter,
            format!("The request must contain the parameter {name}"),
        )
    }

    /// A parameter value could not be parsed.
    #[must_use]
    pub fn invalid_parameter_value(name: &str, value: &str) -> Self {
        Self::with_message(
            RdsErrorCode::InvalidParameterValue,
            format!("Invalid value '{value}' for parameter {name}"),
        )
    }

    /// Internal failure.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::with_message(RdsErrorCode::InternalFailure, message)
    }
}

impl From<BackendError> for RdsError {
    fn from(err: BackendError) -> Self {
        let code = match &err {
            BackendError::NotFound { kind, .. } | BackendError::InvalidReference { kind, .. } => {
                RdsErrorCode::not_found(*kind)
            }
            BackendError::AlreadyExists { kind, .. } => RdsErrorCode::already_exists(*kind),
            BackendError::PreconditionFailed { .. } => RdsErrorCode::InvalidParameterValue,
        };
        let message = match &err {
            BackendError::NotFound { kind, key } | BackendError::InvalidReference { kind, key } => {
                format!("{} {key} not found.", capitalize(kind.as_str()))
            }
            BackendError::AlreadyExists { kind, key } => {
                format!("{} {key} already exists.", capitalize(kind.as_str()))
            }
            other => other.to_string(),
        };
        Self::with_message(code, message)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
