//! Unit tests for key store backends

#[cfg(test)]
pub mod filesystem_tests;
