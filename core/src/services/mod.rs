//! Business services containing domain logic and use cases.

pub mod attempt_guard;
pub mod auth;
pub mod clock;
pub mod notification;
pub mod password;
pub mod token;

// Re-export commonly used types
pub use attempt_guard::{LoginAttemptConfig, LoginAttemptGuard};
pub use auth::{AuthService, AuthServiceConfig, NewUser, UserUpdate};
pub use clock::{Clock, ManualClock, SystemClock};
pub use notification::EmailDispatcher;
pub use password::{generate_password, generate_user_id, BcryptPasswordEncoder, PasswordEncoder};
pub use token::{TokenCodec, TokenCodecConfig};
