use chrono::{DateTime, Utc};

use crate::domain::UserRef;

/// Department model
#[derive(Clone, Debug)]
pub struct Department {
    pub id: String,
    pub name: String,
    pub manager_id: String,
    /// Populated manager (id + email); `None` when the row was loaded without it.
    pub manager: Option<UserRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A department as embedded in employee records (id + name only)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepartmentRef {
    pub id: String,
    pub name: String,
}

pub const MAX_DEPARTMENT_NAME_LEN: usize = 100;

/// Trim and check a department name.
pub fn normalize_department_name(raw: &str) -> Result<String, String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("Department name is required".to_string());
    }
    if name.chars().count() > MAX_DEPARTMENT_NAME_LEN {
        return Err(format!(
            "Department name must be at most {} characters",
            MAX_DEPARTMENT_NAME_LEN
        ));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed() {
        assert_eq!(normalize_department_name("  Eng ").unwrap(), "Eng");
    }

    #[test]
    fn blank_or_oversized_names_are_rejected() {
        assert!(normalize_department_name("   ").is_err());
        assert!(normalize_department_name(&"x".repeat(101)).is_err());
        assert!(normalize_department_name(&"x".repeat(100)).is_ok());
    }
}
