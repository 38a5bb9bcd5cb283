//! Tests for authentication service

#[cfg(test)]
mod lockout_tests;
