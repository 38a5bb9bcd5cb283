//! Tests for the login attempt guard
