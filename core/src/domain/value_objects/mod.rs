//! Value objects representing immutable domain concepts.

pub mod login_outcome;

pub use login_outcome::LoginOutcome;
