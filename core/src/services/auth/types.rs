//! Request types accepted by the authentication service

/// Administrator-created account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    /// Role name such as `ROLE_ADMIN`; unknown names are rejected
    pub role: String,
    pub is_active: bool,
    pub is_not_locked: bool,
}

/// Profile, role and status changes for an existing account
///
/// There is no authorities field: authorities always follow the role.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub is_not_locked: bool,
}
