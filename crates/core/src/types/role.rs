//! Storefront viewing role.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing an unknown role name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid user role: {0}")]
pub struct UserRoleError(String);

/// Who the shopper is pretending to be.
///
/// This is a display toggle: `Admin` reveals product editing controls in the
/// catalog view. It is not authenticated and nothing enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UserRole {
    /// Browse, search, and buy.
    #[default]
    Customer,
    /// Additionally create, edit, and delete products.
    Admin,
}

impl UserRole {
    /// Whether admin-only controls should be shown.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "Customer"),
            Self::Admin => write!(f, "Admin"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = UserRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            _ => Err(UserRoleError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_display() {
        for role in [UserRole::Customer, UserRole::Admin] {
            assert_eq!(role.to_string().parse::<UserRole>(), Ok(role));
        }
    }

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!("ADMIN".parse::<UserRole>(), Ok(UserRole::Admin));
        assert!("owner".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_default_role_is_customer() {
        assert_eq!(UserRole::default(), UserRole::Customer);
        assert!(!UserRole::default().is_admin());
    }

    #[test]
    fn test_role_serde_uses_display_names() {
        let json = serde_json::to_string(&UserRole::Admin).expect("serialize");
        assert_eq!(json, "\"Admin\"");
    }
}
