//! Password hashing and random credential generation

mod encoder;
mod generator;

pub use encoder::{BcryptPasswordEncoder, PasswordEncoder};
pub use generator::{generate_password, generate_user_id, PASSWORD_LENGTH, USER_ID_LENGTH};
