//! Email Delivery Module
//!
//! Implementations of the `EmailDispatcher` collaborator. The logging
//! dispatcher records deliveries without contacting a mail server and is
//! what the API binary wires in.

mod logging_dispatcher;

#[cfg(test)]
mod tests;

pub use logging_dispatcher::{mask_email, LoggingEmailDispatcher, OutgoingEmail};
