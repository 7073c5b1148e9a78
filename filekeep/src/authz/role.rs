//! User roles and capability checks.
//!
//! Role comparisons are centralized here instead of being scattered as
//! string equality checks across call sites; every mutating verb funnels
//! through [`UserContext::require_mutation`].

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// The closed set of user roles.
///
/// # Examples
///
/// ```
/// use filekeep::authz::Role;
///
/// assert!(Role::User.can_mutate());
/// assert!(!Role::Guest.can_mutate());
/// assert!(Role::Admin.can_manage_users());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    /// Full access, including user management in the surrounding product.
    Admin,
    /// Normal read/write access to authorized paths.
    User,
    /// Read-only access; denied every mutating operation.
    Guest,
}

impl Role {
    /// Whether this role may perform mutating filesystem operations.
    #[must_use]
    pub fn can_mutate(self) -> bool {
        !matches!(self, Self::Guest)
    }

    /// Whether this role may manage other users.
    #[must_use]
    pub fn can_manage_users(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Parses a role from its wire form.
    ///
    /// Recognizes: "admin", "user", "guest" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekeep::authz::Role;
    ///
    /// assert_eq!(Role::parse("ADMIN").unwrap(), Role::Admin);
    /// assert!(Role::parse("root").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "guest" => Ok(Self::Guest),
            _ => Err(Error::Validation {
                field: "role".into(),
                message: format!("unknown role: {s}"),
            }),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
            Self::Guest => write!(f, "guest"),
        }
    }
}

/// An authenticated caller: a validated user id plus role.
///
/// The core trusts this pair; session and token verification happen in
/// the surrounding product before it is constructed.
///
/// # Examples
///
/// ```
/// use filekeep::authz::{Role, UserContext};
///
/// let user = UserContext::new("u1", Role::User);
/// assert!(user.require_mutation("/docs").is_ok());
///
/// let guest = UserContext::new("g1", Role::Guest);
/// assert!(guest.require_mutation("/docs").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    /// The validated user id.
    pub id: String,
    /// The caller's role.
    pub role: Role,
}

impl UserContext {
    /// Creates a caller context.
    #[must_use]
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    /// Refuses mutating operations for read-only roles.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AccessDenied`] when the role may not mutate.
    pub fn require_mutation(&self, path: &str) -> Result<()> {
        if self.role.can_mutate() {
            Ok(())
        } else {
            Err(Error::denied(path, "read-only role may not modify files"))
        }
    }
}
