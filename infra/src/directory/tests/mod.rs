//! Tests for directory implementations

#[cfg(test)]
mod memory_tests;
