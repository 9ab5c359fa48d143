//! Authorization check

use crate::domain::{DomainError, DomainResult, User, UserRole};

/// Pass only when `user` holds exactly `required`. There is no role hierarchy.
pub fn require_role(user: &User, required: UserRole) -> DomainResult<()> {
    if user.role == required {
        Ok(())
    } else {
        Err(DomainError::Forbidden(format!(
            "{} role required",
            required.as_str()
        )))
    }
}
