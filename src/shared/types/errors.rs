use thiserror::Error;

/// Errors surfaced by the application and domain layers.
///
/// Every variant maps to exactly one HTTP status at the interface boundary.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: &str) -> Self {
        DomainError::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        let message = e.to_string();
        if message.contains("UNIQUE") || message.contains("duplicate") {
            DomainError::Conflict(message)
        } else {
            DomainError::Internal(format!("Database error: {}", message))
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_maps_to_conflict() {
        let err = sea_orm::DbErr::Custom("UNIQUE constraint failed: users.email".into());
        assert!(matches!(DomainError::from(err), DomainError::Conflict(_)));
    }

    #[test]
    fn other_db_errors_are_internal() {
        let err = sea_orm::DbErr::Custom("disk I/O error".into());
        assert!(matches!(DomainError::from(err), DomainError::Internal(_)));
    }

    #[test]
    fn not_found_message_names_the_entity() {
        let err = DomainError::not_found("Employee", "42");
        assert_eq!(err.to_string(), "Not found: Employee with id=42");
    }
}
