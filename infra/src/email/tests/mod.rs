//! Tests for email dispatchers
