//! Random initial passwords and public user ids

use rand::distributions::Alphanumeric;
use rand::Rng;

pub const PASSWORD_LENGTH: usize = 10;
pub const USER_ID_LENGTH: usize = 10;

/// Random alphanumeric password handed to new users by email
pub fn generate_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}

/// Random numeric public identifier
pub fn generate_user_id() -> String {
    let mut rng = rand::thread_rng();
    (0..USER_ID_LENGTH)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}
