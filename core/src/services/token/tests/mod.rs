//! Tests for the token codec

#[cfg(test)]
mod service_tests;
