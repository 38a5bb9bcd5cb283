//! User entity representing a registered account in the user management portal.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Permission to read user records
pub const USER_READ: &str = "user:read";
/// Permission to create user records
pub const USER_CREATE: &str = "user:create";
/// Permission to update user records
pub const USER_UPDATE: &str = "user:update";
/// Permission to delete user records
pub const USER_DELETE: &str = "user:delete";

const USER_AUTHORITIES: &[&str] = &[USER_READ];
const HR_AUTHORITIES: &[&str] = &[USER_READ, USER_UPDATE];
const MANAGER_AUTHORITIES: &[&str] = &[USER_READ, USER_UPDATE];
const ADMIN_AUTHORITIES: &[&str] = &[USER_READ, USER_CREATE, USER_UPDATE];
const SUPER_ADMIN_AUTHORITIES: &[&str] = &[USER_READ, USER_CREATE, USER_UPDATE, USER_DELETE];

/// Role of a user; the authority set is a fixed function of the role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_HR")]
    Hr,
    #[serde(rename = "ROLE_MANAGER")]
    Manager,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
    #[serde(rename = "ROLE_SUPER_ADMIN")]
    SuperAdmin,
}

impl Role {
    /// Canonical role name
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Hr => "ROLE_HR",
            Role::Manager => "ROLE_MANAGER",
            Role::Admin => "ROLE_ADMIN",
            Role::SuperAdmin => "ROLE_SUPER_ADMIN",
        }
    }

    /// Authorities granted by this role
    pub fn authorities(&self) -> &'static [&'static str] {
        match self {
            Role::User => USER_AUTHORITIES,
            Role::Hr => HR_AUTHORITIES,
            Role::Manager => MANAGER_AUTHORITIES,
            Role::Admin => ADMIN_AUTHORITIES,
            Role::SuperAdmin => SUPER_ADMIN_AUTHORITIES,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ROLE_USER" => Ok(Role::User),
            "ROLE_HR" => Ok(Role::Hr),
            "ROLE_MANAGER" => Ok(Role::Manager),
            "ROLE_ADMIN" => Ok(Role::Admin),
            "ROLE_SUPER_ADMIN" => Ok(Role::SuperAdmin),
            _ => Err(ValidationError::UnknownRole {
                role: s.to_string(),
            }),
        }
    }
}

/// User entity representing a registered account
///
/// The role is private so that authorities can only change through
/// [`User::set_role`]. Serializing a user yields the public snapshot: the
/// password hash is never written out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "UserSnapshot")]
pub struct User {
    /// Directory identifier, `0` until the directory assigns one
    pub id: i64,

    /// Public random identifier shown to clients
    pub user_id: String,

    pub first_name: String,

    pub last_name: String,

    /// Unique across the directory
    pub username: String,

    /// Unique across the directory
    pub email: String,

    /// bcrypt hash of the current password
    pub password_hash: String,

    /// Time of the most recent successful login
    pub last_login_at: Option<DateTime<Utc>>,

    /// Time of the login before the most recent one
    pub last_login_at_previous: Option<DateTime<Utc>>,

    pub joined_at: DateTime<Utc>,

    role: Role,

    pub is_active: bool,

    pub is_not_locked: bool,
}

impl User {
    /// Creates a new, unsaved, active and unlocked user
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: String,
        first_name: String,
        last_name: String,
        username: String,
        email: String,
        password_hash: String,
        role: Role,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            user_id,
            first_name,
            last_name,
            username,
            email,
            password_hash,
            last_login_at: None,
            last_login_at_previous: None,
            joined_at,
            role,
            is_active: true,
            is_not_locked: true,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Changes the role; authorities follow from it
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn authorities(&self) -> &'static [&'static str] {
        self.role.authorities()
    }

    /// Authorities as owned strings, ready for a token claim
    pub fn authority_list(&self) -> Vec<String> {
        self.authorities().iter().map(|a| a.to_string()).collect()
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities().contains(&authority)
    }

    /// Whether the directory has assigned an id
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// Shifts the last login into the previous slot and stamps `now`
    pub fn record_login(&mut self, now: DateTime<Utc>) {
        self.last_login_at_previous = self.last_login_at;
        self.last_login_at = Some(now);
    }

    pub fn lock(&mut self) {
        self.is_not_locked = false;
    }

    pub fn unlock(&mut self) {
        self.is_not_locked = true;
    }
}

/// Serialized form of a [`User`]
#[derive(Debug, Serialize)]
struct UserSnapshot {
    user_id: String,
    first_name: String,
    last_name: String,
    username: String,
    email: String,
    last_login_at: Option<DateTime<Utc>>,
    last_login_at_previous: Option<DateTime<Utc>>,
    joined_at: DateTime<Utc>,
    role: Role,
    authorities: Vec<String>,
    is_active: bool,
    is_not_locked: bool,
}

impl From<User> for UserSnapshot {
    fn from(user: User) -> Self {
        let authorities = user.authority_list();
        Self {
            user_id: user.user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            email: user.email,
            last_login_at: user.last_login_at,
            last_login_at_previous: user.last_login_at_previous,
            joined_at: user.joined_at,
            role: user.role,
            authorities,
            is_active: user.is_active,
            is_not_locked: user.is_not_locked,
        }
    }
}
