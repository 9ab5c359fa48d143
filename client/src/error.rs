//! Client error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or undecodable body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 401: missing, expired or revoked token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 403: the caller's role may not perform the operation
    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other non-2xx status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Map a non-success status and its error message.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => Self::Validation(message),
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            _ => Self::Server { status, message },
        }
    }

    /// The stored session is no longer usable.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_variants() {
        assert!(matches!(ClientError::from_status(400, "x".into()), ClientError::Validation(_)));
        assert!(ClientError::from_status(401, "x".into()).is_unauthorized());
        assert!(matches!(ClientError::from_status(403, "x".into()), ClientError::Forbidden(_)));
        assert!(matches!(ClientError::from_status(404, "x".into()), ClientError::NotFound(_)));
        assert!(matches!(ClientError::from_status(409, "x".into()), ClientError::Conflict(_)));
        assert!(matches!(
            ClientError::from_status(503, "x".into()),
            ClientError::Server { status: 503, .. }
        ));
    }
}
