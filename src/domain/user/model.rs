use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserRole {
    Manager,
    #[default]
    Employee,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Manager => "Manager",
            UserRole::Employee => "Employee",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Manager" => Ok(UserRole::Manager),
            "Employee" => Ok(UserRole::Employee),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// User model
#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_manager(&self) -> bool {
        self.role == UserRole::Manager
    }

    pub fn to_ref(&self) -> UserRef {
        UserRef {
            id: self.id.clone(),
            email: self.email.clone(),
        }
    }
}

/// A user as embedded in other records (id + email only)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRef {
    pub id: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_exact_names_only() {
        assert_eq!("Manager".parse::<UserRole>(), Ok(UserRole::Manager));
        assert_eq!("Employee".parse::<UserRole>(), Ok(UserRole::Employee));
        assert!("manager".parse::<UserRole>().is_err());
        assert!("Admin".parse::<UserRole>().is_err());
    }
}
