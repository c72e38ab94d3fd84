//! Contract error types for the claims service
//!
//! These errors are transport-agnostic and used for inter-module communication.

/// Claims service domain errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimsError {
    /// Claim or child record not found
    NotFound {
        /// Resource type (claim, settlement, ...)
        resource: String,
        /// Resource identifier
        id: String,
    },
    /// Conflict (restricted children present, invalid lifecycle step, ...)
    Conflict {
        /// Conflict reason
        reason: String,
    },
    /// Validation error
    Validation {
        /// Validation error message
        message: String,
    },
    /// Internal error
    Internal,
}

impl std::fmt::Display for ClaimsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { resource, id } => {
                write!(f, "{} not found: {}", resource, id)
            }
            Self::Conflict { reason } => {
                write!(f, "Conflict: {}", reason)
            }
            Self::Validation { message } => {
                write!(f, "Validation error: {}", message)
            }
            Self::Internal => {
                write!(f, "Internal error")
            }
        }
    }
}

impl std::error::Error for ClaimsError {}

impl ClaimsError {
    /// Shorthand for a missing claim root.
    pub fn claim_not_found(id: uuid::Uuid) -> Self {
        Self::NotFound {
            resource: "claim".to_string(),
            id: id.to_string(),
        }
    }
}
