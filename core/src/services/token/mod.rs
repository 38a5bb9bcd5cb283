//! Token codec module for signed bearer tokens
//!
//! This module handles issuing and verifying HMAC-signed tokens that carry
//! the subject's username and authorities with a fixed expiry.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenCodecConfig;
pub use service::{TokenCodec, TOKEN_ALGORITHM};
