//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{
    bearer, Claims, EXPIRATION_TIME_MS, JWT_TOKEN_HEADER, TOKEN_AUDIENCE, TOKEN_ISSUER,
    TOKEN_PREFIX,
};
pub use user::{Role, User, USER_CREATE, USER_DELETE, USER_READ, USER_UPDATE};
